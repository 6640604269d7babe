//! # Inflation pass
//!
//! [`Inflater`] drives one depth-first pass over a specification tree. For
//! each node it picks the builder for the node's primary marker, opens a
//! scope frame under the caller's frame, lets the builder construct and
//! configure the object, and attaches the result to the enclosing container.
//!
//! A failing node is reported and yields no object; its siblings and
//! ancestors still complete. Only fatal errors (an unsatisfiable root
//! orientation) abort the pass.

use crate::binding;
use crate::builders::{
    builder_identifier, AdapterBuilder, Builder, BuilderFactory, BuilderRegistry, EmbedBuilder,
    InvisibleBuilder, LayoutBuilder, ResourceBuilder,
};
use crate::classifier::classify;
use crate::error::{InflateError, InflateResult, Severity};
use crate::invoker::{apply_getters, apply_setters};
use crate::options::InflateOptions;
use crate::orientation::orientation_lock;
use crate::scope::{ScopeArena, ScopeId};
use std::rc::Rc;
use tracing::{debug, error, info, instrument, warn};
use trellis_model::{
    Environment, HookContext, LayoutParams, Marker, ObjectRef, Orientation, SpecCatalog,
    Specification,
};

pub struct Inflater<'env> {
    env: &'env dyn Environment,
    options: InflateOptions,
    catalog: SpecCatalog,
    builders: BuilderRegistry,
    scopes: ScopeArena,
    diagnostics: Vec<InflateError>,
    /// Specification names from the root to the node being built
    path: Vec<String>,
    /// Catalog specifications currently being embedded, outermost first
    embedding: Vec<String>,
}

impl<'env> Inflater<'env> {
    pub fn new(env: &'env dyn Environment) -> Self {
        Self::with_options(env, InflateOptions::default())
    }

    pub fn with_options(env: &'env dyn Environment, options: InflateOptions) -> Self {
        Self {
            env,
            options,
            catalog: SpecCatalog::new(),
            builders: BuilderRegistry::new(),
            scopes: ScopeArena::new(),
            diagnostics: Vec::new(),
            path: Vec::new(),
            embedding: Vec::new(),
        }
    }

    /// Specifications available as embed targets
    pub fn with_catalog(mut self, catalog: SpecCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn register_specification(&mut self, spec: Specification) {
        self.catalog.register(spec);
    }

    /// Registers the builder for custom markers named `marker_name`
    pub fn register_builder(&mut self, marker_name: &str, factory: BuilderFactory) {
        self.builders.register(builder_identifier(marker_name), factory);
    }

    /// Inflates `root` into a fresh pass.
    ///
    /// Returns `Ok(None)` when the root itself could not be built; the reason
    /// is in [`Inflater::diagnostics`].
    pub fn inflate(&mut self, root: &Specification) -> InflateResult<Option<ObjectRef>> {
        self.run_pass(root, false)
    }

    /// Inflates the catalog entry named `name`
    pub fn inflate_named(&mut self, name: &str) -> InflateResult<Option<ObjectRef>> {
        let root = self
            .catalog
            .get(name)
            .ok_or_else(|| InflateError::UnknownSpecification {
                spec: name.to_string(),
                name: name.to_string(),
            })?;
        self.run_pass(&root, true)
    }

    #[instrument(skip(self, root), fields(root = %root.name))]
    fn run_pass(&mut self, root: &Specification, from_catalog: bool) -> InflateResult<Option<ObjectRef>> {
        self.scopes.clear();
        self.diagnostics.clear();
        self.path.clear();
        self.embedding.clear();
        if from_catalog {
            self.embedding.push(root.name.clone());
        }

        info!("Starting inflation");
        let object = self.dispatch(root, None)?;
        info!(
            frames = self.scopes.len(),
            diagnostics = self.diagnostics.len(),
            built = object.is_some(),
            "Inflation complete"
        );
        Ok(object)
    }

    /// Builds one node under `parent`.
    ///
    /// Non-fatal errors are reported and produce `Ok(None)`.
    #[instrument(skip(self, spec, parent), fields(spec = %spec.name))]
    pub fn dispatch(
        &mut self,
        spec: &Specification,
        parent: Option<ScopeId>,
    ) -> InflateResult<Option<ObjectRef>> {
        match self.dispatch_node(spec, parent) {
            Ok(object) => Ok(object),
            Err(err) if err.is_fatal() => {
                error!(error = %err, "Inflation aborted");
                Err(err)
            }
            Err(err) => {
                self.report(err);
                Ok(None)
            }
        }
    }

    fn dispatch_node(
        &mut self,
        spec: &Specification,
        parent: Option<ScopeId>,
    ) -> InflateResult<Option<ObjectRef>> {
        let marker = spec
            .primary_marker()
            .ok_or_else(|| InflateError::UnresolvedBuilder {
                spec: spec.name.clone(),
            })?;

        let depth = parent.map_or(0, |p| self.scopes.get(p).depth() + 1);
        if depth > self.options.max_depth {
            let mut call_stack = self.path.clone();
            call_stack.push(spec.name.clone());
            return Err(InflateError::RecursiveSpecification {
                spec: spec.name.clone(),
                call_stack,
            });
        }

        let mut builder = self.builder_for(spec, marker)?;
        debug!(marker = marker.type_name(), depth, "Dispatching");

        let scope = self.scopes.push(&spec.name, parent);
        self.path.push(spec.name.clone());
        let result = builder.build(spec, self, scope);
        self.path.pop();
        self.scopes.seal(scope);
        let object = result?;

        if let Some(parent) = parent {
            if let Some(produced) = self.scopes.get(scope).object().cloned() {
                self.scopes
                    .get_mut(parent)
                    .children
                    .push((spec.name.clone(), produced));
            }
        }
        Ok(object)
    }

    fn builder_for(&self, spec: &Specification, marker: &Marker) -> InflateResult<Box<dyn Builder>> {
        let builder: Box<dyn Builder> = match marker {
            Marker::Layout(m) => Box::new(LayoutBuilder::new(m.clone())),
            Marker::Embed(m) => Box::new(EmbedBuilder::new(m.clone())),
            Marker::Invisible(m) => Box::new(InvisibleBuilder::new(m.clone())),
            Marker::Adapter(m) => Box::new(AdapterBuilder::new(m.clone())),
            Marker::Resource(m) => Box::new(ResourceBuilder::new(m.clone())),
            Marker::Custom { name, .. } => {
                let identifier = builder_identifier(name);
                return self
                    .builders
                    .create(&identifier)
                    .ok_or(InflateError::BuilderNotFound {
                        spec: spec.name.clone(),
                        identifier,
                    });
            }
            Marker::Foreign { .. } => {
                return Err(InflateError::UnresolvedBuilder {
                    spec: spec.name.clone(),
                })
            }
        };
        Ok(builder)
    }

    /// Classifies the node's fields, resolves its bindings, then runs its
    /// getters and setters against `target`
    pub fn configure(&mut self, spec: &Specification, scope: ScopeId, target: &ObjectRef) {
        for field in &spec.fields {
            if let Err(err) = classify(&spec.name, field, self.env, &mut self.scopes, scope) {
                self.report(err);
            }
        }
        for warning in binding::resolve(&mut self.scopes, scope) {
            self.report(warning);
        }
        for err in apply_getters(self.env, target, &mut self.scopes, scope) {
            self.report(err);
        }
        for err in apply_setters(self.env, target, self.scopes.get(scope)) {
            self.report(err);
        }
    }

    /// Dispatches each nested specification and attaches what it produced
    pub fn inflate_children(
        &mut self,
        spec: &Specification,
        scope: ScopeId,
        container: &ObjectRef,
    ) -> InflateResult<()> {
        if spec.nested.is_empty() {
            return Ok(());
        }
        if !container.is_container() {
            warn!(
                spec = %spec.name,
                kind = container.kind(),
                nested = spec.nested.len(),
                "Nested specifications ignored on a non-container kind"
            );
            return Ok(());
        }

        for nested in &spec.nested {
            let Some(child) = self.dispatch(nested, Some(scope))? else {
                continue;
            };
            let kind = child.kind().to_string();
            if let Err(err) = container.add_child(child) {
                self.report(InflateError::construction(&nested.name, kind, err));
            }
        }
        Ok(())
    }

    /// Runs the node's completion hook, if it declares one
    pub fn complete(&self, spec: &Specification, scope: ScopeId, object: Option<&ObjectRef>) {
        let Some(hook) = spec.find_static(&self.options.completion_hook) else {
            return;
        };
        debug!(spec = %spec.name, hook = %hook.name, "Running completion hook");
        hook.call(&HookContext {
            env: self.env,
            object,
            fields: self.scopes.get(scope).fields(),
        });
    }

    pub fn set_object(&mut self, scope: ScopeId, object: ObjectRef) {
        self.scopes.get_mut(scope).object = Some(object);
    }

    pub fn is_root(&self, scope: ScopeId) -> bool {
        self.scopes.get(scope).parent().is_none()
    }

    /// Translates the allowed orientations into a host lock request
    pub fn lock_orientation(&mut self, spec: &Specification, allowed: &[Orientation]) -> InflateResult<()> {
        let lock = orientation_lock(&spec.name, allowed)?;
        info!(spec = %spec.name, lock = ?lock, "Requesting orientation lock");
        self.env.request_orientation(lock);
        Ok(())
    }

    pub fn construct(&self, spec: &Specification, kind: &str, layout: &LayoutParams) -> InflateResult<ObjectRef> {
        self.env
            .construct(kind, layout)
            .map_err(|err| InflateError::construction(&spec.name, kind, err))
    }

    /// Constructs `kind`, falling back to the default container kind when
    /// the host cannot build it
    pub fn construct_or_fallback(
        &mut self,
        spec: &Specification,
        kind: &str,
        layout: &LayoutParams,
    ) -> InflateResult<ObjectRef> {
        match self.construct(spec, kind, layout) {
            Ok(object) => Ok(object),
            Err(err) if kind != self.options.default_container_kind => {
                self.report(err);
                let fallback = self.options.default_container_kind.clone();
                warn!(spec = %spec.name, kind, fallback = %fallback, "Falling back to default container kind");
                self.construct(spec, &fallback, layout)
            }
            Err(err) => Err(err),
        }
    }

    /// Dispatches the catalog specification `target` under `parent`.
    ///
    /// Embedding a specification that is already being embedded on the
    /// current path is reported as `RecursiveSpecification`.
    pub fn dispatch_embedded(
        &mut self,
        target: &Specification,
        parent: ScopeId,
    ) -> InflateResult<Option<ObjectRef>> {
        if self.embedding.contains(&target.name) {
            let mut call_stack = self.path.clone();
            call_stack.push(target.name.clone());
            return Err(InflateError::RecursiveSpecification {
                spec: target.name.clone(),
                call_stack,
            });
        }

        self.embedding.push(target.name.clone());
        let result = self.dispatch(target, Some(parent));
        self.embedding.pop();
        result
    }

    pub fn path(&self) -> &[String] {
        &self.path
    }

    pub fn lookup_specification(&self, name: &str) -> Option<Rc<Specification>> {
        self.catalog.get(name)
    }

    /// Logs a recovered error and keeps it for [`Inflater::diagnostics`]
    pub fn report(&mut self, err: InflateError) {
        match err.severity() {
            Severity::Warning => warn!(error = %err, "Inflation warning"),
            Severity::Error | Severity::Fatal => error!(error = %err, "Inflation error"),
        }
        if self.options.collect_diagnostics {
            self.diagnostics.push(err);
        }
    }

    pub fn diagnostics(&self) -> &[InflateError] {
        &self.diagnostics
    }

    pub fn scopes(&self) -> &ScopeArena {
        &self.scopes
    }

    pub fn environment(&self) -> &'env dyn Environment {
        self.env
    }

    pub fn options(&self) -> &InflateOptions {
        &self.options
    }

    pub fn catalog(&self) -> &SpecCatalog {
        &self.catalog
    }
}

/// Inflates `root` against `env` with default options
pub fn inflate(root: &Specification, env: &dyn Environment) -> InflateResult<Option<ObjectRef>> {
    Inflater::new(env).inflate(root)
}
