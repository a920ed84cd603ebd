//! Recursion detection over the compiled type graph.

use oxrdf::NamedNode;

use crate::ast::{Ast, ObjectType, Property, Type};
use crate::model::ShapeId;

/// A position in the type graph walk: which object type property is being expanded
/// and where inside its type tree the walk currently is.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Frame {
    object_type: ShapeId,
    property_path: NamedNode,
    type_path: Vec<usize>,
}

/// Returns true if the property's value type can reach back to the property itself.
///
/// The walk keeps an explicit frame stack. Reaching a frame structurally equal to an
/// earlier one ends that branch: the walk is recursive only when the matched frame is
/// the root property's frame. Cycles through other properties terminate silently and
/// are reported on their own root instead.
pub fn is_object_type_property_recursive(
    ast: &Ast,
    object_type: &ObjectType,
    property: &Property,
) -> bool {
    let mut stack = Vec::new();
    walk(
        ast,
        &mut stack,
        &object_type.id,
        &property.path,
        &[],
        &property.ty,
    )
}

fn walk(
    ast: &Ast,
    stack: &mut Vec<Frame>,
    object_type: &ShapeId,
    property_path: &NamedNode,
    type_path: &[usize],
    ty: &Type,
) -> bool {
    let frame = Frame {
        object_type: object_type.clone(),
        property_path: property_path.clone(),
        type_path: type_path.to_vec(),
    };
    if let Some(position) = stack.iter().position(|earlier| *earlier == frame) {
        return position == 0;
    }
    stack.push(frame);

    let recursive = match ty {
        Type::Identifier(_) | Type::Literal(_) | Type::Term(_) => false,
        Type::Option(item) => {
            walk_child(ast, stack, object_type, property_path, type_path, 0, item)
        }
        Type::Set(set) => {
            walk_child(ast, stack, object_type, property_path, type_path, 0, &set.item)
        }
        Type::List(list) => {
            walk_child(ast, stack, object_type, property_path, type_path, 0, &list.item)
        }
        Type::Union(union) => union.members.iter().enumerate().any(|(i, member)| {
            walk_child(ast, stack, object_type, property_path, type_path, i, member)
        }),
        Type::Intersection(intersection) => {
            intersection.members.iter().enumerate().any(|(i, member)| {
                walk_child(ast, stack, object_type, property_path, type_path, i, member)
            })
        }
        Type::Object(reference) => {
            // Partial (stub) view first, then the full type
            reference
                .stub
                .iter()
                .chain(std::iter::once(&reference.id))
                .any(|target| walk_object_type(ast, stack, target))
        }
        Type::ObjectUnion(id) => ast.object_union_type(id).is_some_and(|union| {
            union
                .members
                .iter()
                .any(|member| walk_object_type(ast, stack, member))
        }),
        Type::ObjectIntersection(id) => {
            ast.object_intersection_type(id).is_some_and(|intersection| {
                intersection
                    .members
                    .iter()
                    .any(|member| walk_object_type(ast, stack, member))
            })
        }
    };

    stack.pop();
    recursive
}

fn walk_child(
    ast: &Ast,
    stack: &mut Vec<Frame>,
    object_type: &ShapeId,
    property_path: &NamedNode,
    type_path: &[usize],
    index: usize,
    child: &Type,
) -> bool {
    let mut child_path = type_path.to_vec();
    child_path.push(index);
    walk(ast, stack, object_type, property_path, &child_path, child)
}

fn walk_object_type(ast: &Ast, stack: &mut Vec<Frame>, target: &ShapeId) -> bool {
    let Some(target_type) = ast.object_type(target) else {
        return false;
    };
    target_type.properties.iter().any(|property| {
        walk(
            ast,
            stack,
            &target_type.id,
            &property.path,
            &[],
            &property.ty,
        )
    })
}
