//! Property-based invariant tests for geometry primitives (Rect, Insets).
//!
//! 1. Contains is half-open: right/bottom edges are never inside.
//! 2. Contains implies the rect is non-empty.
//! 3. Removing insets never grows a rect and never yields negative sizes.
//! 4. A rect with removed insets lies within the original (when it fits).
//! 5. Intersects is symmetric.
//! 6. Splitting a rect in two along an axis gives disjoint halves.

use flexdock_core::geometry::{Insets, Orientation, Rect};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn rect_strategy() -> impl Strategy<Value = Rect> {
    (-500i32..=500, -500i32..=500, 0i32..=500, 0i32..=500)
        .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
}

fn insets_strategy() -> impl Strategy<Value = Insets> {
    (0i32..=300, 0i32..=300, 0i32..=300, 0i32..=300)
        .prop_map(|(t, r, b, l)| Insets::new(t, r, b, l))
}

// ═════════════════════════════════════════════════════════════════════════
// 1-2. Containment
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn contains_excludes_far_edges(r in rect_strategy(), dx in 0i32..=500, dy in 0i32..=500) {
        prop_assert!(!r.contains(r.right(), r.y + dy));
        prop_assert!(!r.contains(r.x + dx, r.bottom()));
    }

    #[test]
    fn contains_implies_non_empty(r in rect_strategy(), x in -600i32..=1100, y in -600i32..=1100) {
        if r.contains(x, y) {
            prop_assert!(!r.is_empty());
            prop_assert!(x >= r.x && x < r.right());
            prop_assert!(y >= r.y && y < r.bottom());
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3-4. Insets
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #![proptest_config(ProptestConfig { max_global_rejects: 65536, ..ProptestConfig::default() })]

    #[test]
    fn remove_insets_never_grows(r in rect_strategy(), i in insets_strategy()) {
        let inner = r.remove_insets(i);
        prop_assert!(inner.width >= 0 && inner.height >= 0);
        prop_assert!(inner.width <= r.width);
        prop_assert!(inner.height <= r.height);
    }

    #[test]
    fn remove_insets_stays_within(r in rect_strategy(), i in insets_strategy()) {
        prop_assume!(i.horizontal_sum() <= r.width && i.vertical_sum() <= r.height);
        let inner = r.remove_insets(i);
        prop_assert!(inner.is_within(&r), "inner={:?} outer={:?}", inner, r);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5-6. Overlap
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn intersects_symmetric(a in rect_strategy(), b in rect_strategy()) {
        prop_assert_eq!(a.intersects(&b), b.intersects(&a));
    }

    #[test]
    fn axis_split_halves_are_disjoint(r in rect_strategy(), cut in 0i32..=500, vert in any::<bool>()) {
        let orientation = if vert { Orientation::Vert } else { Orientation::Horz };
        let cut = cut.min(r.size(orientation));
        let (first, second) = match orientation {
            Orientation::Horz => (
                Rect::new(r.x, r.y, cut, r.height),
                Rect::new(r.x + cut, r.y, r.width - cut, r.height),
            ),
            Orientation::Vert => (
                Rect::new(r.x, r.y, r.width, cut),
                Rect::new(r.x, r.y + cut, r.width, r.height - cut),
            ),
        };
        prop_assert!(!first.intersects(&second));
        prop_assert_eq!(first.size(orientation) + second.size(orientation), r.size(orientation));
    }
}
