//! Canonical form for requisite trees.
//!
//! The source tables nest groups arbitrarily, so the same requirement can be
//! parsed into many shapes. Normalization merges each child group that shares
//! its parent's operator into the parent, drops empty members, and collapses
//! groups with fewer than two items.

use crate::domain::{Group, Requisite};

/// Normalizes a requisite tree bottom-up.
///
/// Children are normalized first, so one splice per level flattens whole
/// chains of same-operator groups. Within a group, items that stay in place
/// come first, followed by the items spliced in from merged children in the
/// order those children appeared.
///
/// The result never contains a group with fewer than two items, an empty
/// member, or a child group with its parent's operator. Normalizing twice
/// gives the same tree as normalizing once.
#[must_use]
pub fn normalize(requisite: Requisite) -> Requisite {
    match requisite {
        Requisite::Group(group) => normalize_group(group),
        leaf @ (Requisite::Empty | Requisite::Course(_) | Requisite::Test(_)) => leaf,
    }
}

fn normalize_group(group: Group) -> Requisite {
    let (operator, items) = group.into_parts();

    let mut kept = Vec::with_capacity(items.len());
    let mut merged = Vec::new();

    for item in items.into_iter().map(normalize) {
        match item {
            Requisite::Empty => {}
            Requisite::Group(child) if child.operator() == operator => {
                merged.extend(child.into_parts().1);
            }
            other => kept.push(other),
        }
    }
    kept.append(&mut merged);

    if kept.len() > 1 {
        Requisite::group(operator, kept)
    } else {
        kept.pop().unwrap_or(Requisite::Empty)
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;
    use crate::domain::Operator;

    fn course(number: &str) -> Requisite {
        Requisite::course("CS", number)
    }

    #[test]
    fn leaves_are_unchanged() {
        assert_eq!(normalize(Requisite::Empty), Requisite::Empty);
        assert_eq!(normalize(course("2500")), course("2500"));
        assert_eq!(
            normalize(Requisite::test("SAT Math", 600)),
            Requisite::test("SAT Math", 600)
        );
    }

    #[test]
    fn same_operator_child_is_flattened() {
        let tree = Requisite::and(vec![
            course("A"),
            Requisite::and(vec![course("B"), course("C")]),
        ]);

        assert_eq!(
            normalize(tree),
            Requisite::and(vec![course("A"), course("B"), course("C")])
        );
    }

    #[test]
    fn different_operator_child_is_kept() {
        let tree = Requisite::and(vec![
            course("A"),
            Requisite::or(vec![course("B"), course("C")]),
        ]);

        assert_eq!(normalize(tree.clone()), tree);
    }

    #[test]
    fn deep_same_operator_chain_is_flattened() {
        let tree = Requisite::or(vec![
            course("A"),
            Requisite::or(vec![
                course("B"),
                Requisite::or(vec![course("C"), Requisite::or(vec![course("D")])]),
            ]),
        ]);

        assert_eq!(
            normalize(tree),
            Requisite::or(vec![course("A"), course("B"), course("C"), course("D")])
        );
    }

    #[test]
    fn kept_items_precede_merged_items() {
        let tree = Requisite::and(vec![
            Requisite::and(vec![course("A"), course("B")]),
            course("C"),
            Requisite::or(vec![course("D"), course("E")]),
            Requisite::and(vec![course("F"), course("G")]),
        ]);

        assert_eq!(
            normalize(tree),
            Requisite::and(vec![
                course("C"),
                Requisite::or(vec![course("D"), course("E")]),
                course("A"),
                course("B"),
                course("F"),
                course("G"),
            ])
        );
    }

    #[test_case(Operator::And; "and")]
    #[test_case(Operator::Or; "or")]
    fn singleton_collapses_to_member(operator: Operator) {
        assert_eq!(
            normalize(Requisite::group(operator, vec![course("A")])),
            course("A")
        );

        let inner = Requisite::and(vec![course("B"), course("C")]);
        let expected = normalize(inner.clone());
        assert_eq!(
            normalize(Requisite::group(operator, vec![inner])),
            expected
        );
    }

    #[test_case(Operator::And; "and")]
    #[test_case(Operator::Or; "or")]
    fn empty_group_collapses_to_empty(operator: Operator) {
        assert_eq!(
            normalize(Requisite::group(operator, Vec::new())),
            Requisite::Empty
        );
    }

    #[test]
    fn collapsed_child_merges_into_matching_parent() {
        // or[and[or[a, b]]] -> the inner and collapses to or[a, b], which then
        // matches its parent.
        let tree = Requisite::or(vec![
            course("A"),
            Requisite::and(vec![Requisite::or(vec![course("B"), course("C")])]),
        ]);

        assert_eq!(
            normalize(tree),
            Requisite::or(vec![course("A"), course("B"), course("C")])
        );
    }

    #[test]
    fn empty_members_are_dropped() {
        let tree = Requisite::and(vec![
            Requisite::or(Vec::new()),
            course("A"),
            Requisite::Empty,
            course("B"),
        ]);

        assert_eq!(normalize(tree), Requisite::and(vec![course("A"), course("B")]));
    }

    #[test]
    fn normalization_is_idempotent() {
        let trees = [
            Requisite::Empty,
            course("A"),
            Requisite::and(vec![
                Requisite::and(vec![course("A"), Requisite::or(vec![course("B")])]),
                Requisite::or(vec![
                    Requisite::and(vec![course("C"), course("D")]),
                    Requisite::or(vec![course("E"), Requisite::test("SAT Math", 700)]),
                ]),
                Requisite::or(Vec::new()),
            ]),
            Requisite::or(vec![Requisite::and(vec![Requisite::or(vec![
                course("A"),
                Requisite::and(vec![course("B"), Requisite::and(vec![course("C")])]),
            ])])]),
        ];

        for tree in trees {
            let once = normalize(tree);
            assert_eq!(normalize(once.clone()), once);
        }
    }
    #[test]
    fn parsed_tables_normalize_idempotently() {
        let directory = crate::domain::subject::directory();
        for rows in crate::parser::sample_tables() {
            let once = normalize(crate::parse_prereqs(&rows, &directory).unwrap());
            assert_eq!(normalize(once.clone()), once);
        }
    }

    #[test]
    fn parsed_tables_normalize_to_canonical_form() {
        fn check(requisite: &Requisite) {
            let Requisite::Group(group) = requisite else {
                return;
            };
            assert!(group.items().len() >= 2);
            for item in group.items() {
                assert_ne!(item, &Requisite::Empty);
                if let Requisite::Group(child) = item {
                    assert_ne!(child.operator(), group.operator());
                }
                check(item);
            }
        }

        let directory = crate::domain::subject::directory();
        for rows in crate::parser::sample_tables() {
            check(&normalize(crate::parse_prereqs(&rows, &directory).unwrap()));
        }
    }
}
