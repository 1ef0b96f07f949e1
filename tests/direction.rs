use glam::IVec2;
use pacman_arcade::map::direction::Direction;
use speculoos::prelude::*;
use strum::IntoEnumIterator;

#[test]
fn test_direction_opposite() {
    let test_cases = [
        (Direction::Up, Direction::Down),
        (Direction::Down, Direction::Up),
        (Direction::Left, Direction::Right),
        (Direction::Right, Direction::Left),
    ];

    for (dir, expected) in test_cases {
        assert_that(&dir.opposite()).is_equal_to(expected);
        assert_that(&dir.opposite().opposite()).is_equal_to(dir);
    }
}

#[test]
fn test_direction_as_ivec2() {
    let test_cases = [
        (Direction::Up, -IVec2::Y),
        (Direction::Down, IVec2::Y),
        (Direction::Left, -IVec2::X),
        (Direction::Right, IVec2::X),
    ];

    for (dir, expected) in test_cases {
        assert_that(&dir.as_ivec2()).is_equal_to(expected);
        assert_that(&IVec2::from(dir)).is_equal_to(expected);
    }
}

#[test]
fn test_opposite_steps_cancel_out() {
    for dir in Direction::iter() {
        assert_that(&(dir.as_ivec2() + dir.opposite().as_ivec2())).is_equal_to(IVec2::ZERO);
    }
}

#[test]
fn test_directions_order() {
    assert_that(&Direction::DIRECTIONS.to_vec()).is_equal_to(Direction::iter().collect::<Vec<_>>());
    assert_that(&Direction::Left.as_ref()).is_equal_to("left");
}
