//! Static checks over a specification tree, run without constructing anything.

use crate::orientation::orientation_lock;
use serde::Serialize;
use std::collections::HashSet;
use trellis_model::{
    walk_specification, FieldDecl, FieldRole, Marker, Padding, SpecCatalog, SpecDocument,
    SpecVisitor, Specification,
};

/// Validation warning level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationLevel {
    /// Inflation will work around it
    Warning,
    /// Inflation will skip an effect or a subtree, or abort
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationWarning {
    pub level: ValidationLevel,
    pub message: String,
    /// Specification the problem was found in
    pub spec: String,
}

impl ValidationWarning {
    pub fn warning(spec: &str, message: impl Into<String>) -> Self {
        Self {
            level: ValidationLevel::Warning,
            message: message.into(),
            spec: spec.to_string(),
        }
    }

    pub fn error(spec: &str, message: impl Into<String>) -> Self {
        Self {
            level: ValidationLevel::Error,
            message: message.into(),
            spec: spec.to_string(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == ValidationLevel::Error
    }
}

/// Validator for specification trees
#[derive(Default)]
pub struct Validator<'a> {
    /// Embed targets; embed checks are skipped without one
    catalog: Option<&'a SpecCatalog>,
    /// Variable names exported by each frame on the current path
    exported: Vec<HashSet<String>>,
    /// Embed targets being validated, to stop on cycles
    embedding: Vec<String>,
    warnings: Vec<ValidationWarning>,
}

impl<'a> Validator<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_catalog(catalog: &'a SpecCatalog) -> Self {
        Self {
            catalog: Some(catalog),
            ..Self::default()
        }
    }

    /// Validates the tree rooted at `root`, following embeds through the catalog
    pub fn validate(&mut self, root: &Specification) -> Vec<ValidationWarning> {
        self.warnings.clear();
        self.exported.clear();
        self.embedding.clear();
        self.visit_specification(root);
        self.warnings.clone()
    }

    /// Validates the document's root specification
    pub fn validate_document(&mut self, doc: &SpecDocument) -> Vec<ValidationWarning> {
        match doc.root_spec() {
            Some(root) => self.validate(root),
            None => vec![ValidationWarning::error(
                &doc.root,
                format!("Root specification '{}' is not defined in the document", doc.root),
            )],
        }
    }

    fn is_root(&self) -> bool {
        self.exported.len() == 1
    }

    fn check_markers(&mut self, spec: &Specification) {
        let recognized = spec.markers.iter().filter(|m| m.is_recognized()).count();
        match recognized {
            0 => self.warnings.push(ValidationWarning::error(
                &spec.name,
                "No recognized builder marker, the specification will not be built",
            )),
            1 => {}
            n => self.warnings.push(ValidationWarning::warning(
                &spec.name,
                format!(
                    "{} builder markers declared, only '{}' is used",
                    n,
                    spec.primary_marker().map(Marker::type_name).unwrap_or_default()
                ),
            )),
        }
    }

    fn check_variables(&mut self, spec: &Specification) -> HashSet<String> {
        let mut names = HashSet::new();
        for field in &spec.fields {
            if field.role == Some(FieldRole::Variable) && !names.insert(field.name.clone()) {
                self.warnings.push(ValidationWarning::warning(
                    &spec.name,
                    format!("Variable '{}' declared more than once, the first declaration wins", field.name),
                ));
            }
        }
        names
    }
}

impl SpecVisitor for Validator<'_> {
    fn visit_specification(&mut self, spec: &Specification) {
        self.check_markers(spec);
        let names = self.check_variables(spec);
        self.exported.push(names);
        walk_specification(self, spec);
        self.exported.pop();
    }

    fn visit_marker(&mut self, spec: &Specification, marker: &Marker) {
        let orientation = match marker {
            Marker::Layout(layout) => {
                if Padding::from_declared(&layout.padding).is_none() {
                    self.warnings.push(ValidationWarning::warning(
                        &spec.name,
                        format!(
                            "Padding takes one or four values, found {}; zero padding will be used",
                            layout.padding.len()
                        ),
                    ));
                }
                Some(&layout.orientation)
            }
            Marker::Resource(resource) => Some(&resource.orientation),
            Marker::Embed(embed) => {
                let Some(catalog) = self.catalog else {
                    return;
                };
                match catalog.get(&embed.layout) {
                    None => self.warnings.push(ValidationWarning::error(
                        &spec.name,
                        format!("Embedded specification '{}' is not registered", embed.layout),
                    )),
                    Some(_) if self.embedding.contains(&embed.layout) => {
                        self.warnings.push(ValidationWarning::error(
                            &spec.name,
                            format!("Specification '{}' embeds itself", embed.layout),
                        ))
                    }
                    Some(target) => {
                        // The target is built before this node's variables exist
                        let own = self
                            .exported
                            .last_mut()
                            .map(std::mem::take)
                            .unwrap_or_default();
                        self.embedding.push(embed.layout.clone());
                        self.visit_specification(&target);
                        self.embedding.pop();
                        if let Some(top) = self.exported.last_mut() {
                            *top = own;
                        }
                    }
                }
                None
            }
            _ => None,
        };

        let is_primary = spec.primary_marker().is_some_and(|primary| primary == marker);
        if let (Some(allowed), true) = (orientation, is_primary && self.is_root()) {
            if let Err(err) = orientation_lock(&spec.name, allowed) {
                self.warnings.push(ValidationWarning::error(&spec.name, err.to_string()));
            }
        }
    }

    fn visit_field(&mut self, spec: &Specification, field: &FieldDecl) {
        match &field.role {
            Some(role @ (FieldRole::Setter | FieldRole::Getter { .. }))
                if field.init.is_none() && field.value.as_list().is_none() =>
            {
                self.warnings.push(ValidationWarning::error(
                    &spec.name,
                    format!(
                        "Field '{}' is a {} but its value is {}, not a parameter list",
                        field.name,
                        role.label(),
                        field.value.type_name()
                    ),
                ));
            }
            Some(FieldRole::Binding { observed }) => {
                if !self.exported.iter().any(|names| names.contains(observed)) {
                    self.warnings.push(ValidationWarning::warning(
                        &spec.name,
                        format!(
                            "Binding '{}' observes '{}', which no enclosing specification exports; the default applies",
                            field.name, observed
                        ),
                    ));
                }
            }
            _ => {}
        }
    }
}
