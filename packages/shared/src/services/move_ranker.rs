use crate::models::position::{AnnotatedMove, AvailableMoves, RemoteMove};

pub const FULL_OPACITY: f64 = 1.0;
pub const OPACITY_STEP: f64 = 0.25;
pub const MIN_OPACITY: f64 = 0.5;

/// Annotates solver moves with a `move_value_opacity`.
///
/// Moves arrive ordered best first. Within a run of consecutive moves sharing
/// a move value, each change in delta remoteness dims the move by one step
/// until the floor is reached. A new move value starts a new run at full
/// opacity.
pub fn rank_moves(moves: &[RemoteMove]) -> AvailableMoves {
    let mut ranked = AvailableMoves::default();
    let mut previous: Option<(&RemoteMove, f64)> = None;

    for current in moves {
        let opacity = match previous {
            Some((prev, prev_opacity)) if prev.move_value == current.move_value => {
                if prev_opacity <= MIN_OPACITY {
                    MIN_OPACITY
                } else if prev.delta_remoteness != current.delta_remoteness {
                    prev_opacity - OPACITY_STEP
                } else {
                    prev_opacity
                }
            }
            _ => FULL_OPACITY,
        };

        ranked.insert(AnnotatedMove::from_remote(current, opacity));
        previous = Some((current, opacity));
    }

    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::position::PositionValue;
    use proptest::prelude::*;

    fn remote(label: &str, value: PositionValue, delta: i32) -> RemoteMove {
        RemoteMove {
            move_label: label.to_string(),
            move_value: value,
            position: format!("after-{}", label),
            position_value: PositionValue::Lose,
            remoteness: 3,
            delta_remoteness: delta,
        }
    }

    fn opacities(ranked: &AvailableMoves) -> Vec<f64> {
        ranked.iter().map(|m| m.move_value_opacity).collect()
    }

    #[test]
    fn test_empty_move_list() {
        assert!(rank_moves(&[]).is_empty());
    }

    #[test]
    fn test_single_move_is_fully_opaque() {
        let ranked = rank_moves(&[remote("a", PositionValue::Lose, 3)]);

        assert_eq!(opacities(&ranked), vec![1.0]);
    }

    #[test]
    fn test_increasing_delta_dims_down_to_floor() {
        let ranked = rank_moves(&[
            remote("a", PositionValue::Win, 0),
            remote("b", PositionValue::Win, 2),
            remote("c", PositionValue::Win, 5),
            remote("d", PositionValue::Win, 7),
        ]);

        assert_eq!(opacities(&ranked), vec![1.0, 0.75, 0.5, 0.5]);
    }

    #[test]
    fn test_equal_delta_inherits_opacity() {
        let ranked = rank_moves(&[
            remote("a", PositionValue::Win, 0),
            remote("b", PositionValue::Win, 2),
            remote("c", PositionValue::Win, 2),
        ]);

        assert_eq!(opacities(&ranked), vec![1.0, 0.75, 0.75]);
    }

    #[test]
    fn test_value_change_resets_run() {
        let ranked = rank_moves(&[
            remote("a", PositionValue::Win, 0),
            remote("b", PositionValue::Win, 1),
            remote("c", PositionValue::Win, 2),
            remote("d", PositionValue::Tie, 2),
            remote("e", PositionValue::Tie, 4),
            remote("f", PositionValue::Lose, 4),
        ]);

        assert_eq!(opacities(&ranked), vec![1.0, 0.75, 0.5, 1.0, 0.75, 1.0]);
    }

    #[test]
    fn test_moves_keyed_by_label() {
        let ranked = rank_moves(&[
            remote("a", PositionValue::Win, 0),
            remote("b", PositionValue::Win, 1),
        ]);

        let b = ranked.get("b").unwrap();
        assert_eq!(b.position, "after-b");
        assert_eq!(b.move_value_opacity, 0.75);
    }

    fn value_strategy() -> impl Strategy<Value = PositionValue> {
        prop_oneof![
            Just(PositionValue::Win),
            Just(PositionValue::Lose),
            Just(PositionValue::Tie),
            Just(PositionValue::Draw),
        ]
    }

    proptest! {
        #[test]
        fn prop_opacity_bounded_and_non_increasing_within_run(
            raw in prop::collection::vec((value_strategy(), 0i32..6), 0..20)
        ) {
            let moves: Vec<RemoteMove> = raw
                .iter()
                .enumerate()
                .map(|(i, (value, delta))| remote(&format!("m{}", i), *value, *delta))
                .collect();

            let ranked_moves = rank_moves(&moves);
            let ranked: Vec<&AnnotatedMove> = ranked_moves.iter().collect();
            prop_assert_eq!(ranked.len(), moves.len());

            for (i, annotated) in ranked.iter().enumerate() {
                prop_assert!(annotated.move_value_opacity >= MIN_OPACITY);
                prop_assert!(annotated.move_value_opacity <= FULL_OPACITY);
                if i == 0 || ranked[i - 1].move_value != annotated.move_value {
                    prop_assert_eq!(annotated.move_value_opacity, FULL_OPACITY);
                } else {
                    prop_assert!(annotated.move_value_opacity <= ranked[i - 1].move_value_opacity);
                }
            }
        }
    }
}
