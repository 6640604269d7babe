use crate::document::SpecDocument;
use crate::spec::{FieldDecl, Marker, Specification};

/// Visitor pattern for traversing specification trees immutably
///
/// The default implementations walk the whole tree. Override specific
/// visit_* methods to act on nodes; call the matching walk_* function to
/// keep descending.
pub trait SpecVisitor: Sized {
    fn visit_document(&mut self, doc: &SpecDocument) {
        walk_document(self, doc);
    }

    fn visit_specification(&mut self, spec: &Specification) {
        walk_specification(self, spec);
    }

    fn visit_marker(&mut self, _spec: &Specification, _marker: &Marker) {
        // Leaf node, no children to walk
    }

    fn visit_field(&mut self, _spec: &Specification, _field: &FieldDecl) {
        // Leaf node, no children to walk
    }
}

pub fn walk_document<V: SpecVisitor>(visitor: &mut V, doc: &SpecDocument) {
    for spec in &doc.specifications {
        visitor.visit_specification(spec);
    }
}

pub fn walk_specification<V: SpecVisitor>(visitor: &mut V, spec: &Specification) {
    for marker in &spec.markers {
        visitor.visit_marker(spec, marker);
    }
    for field in &spec.fields {
        visitor.visit_field(spec, field);
    }
    for nested in &spec.nested {
        visitor.visit_specification(nested);
    }
}
