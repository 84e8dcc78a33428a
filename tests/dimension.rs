// SPDX-License-Identifier: Apache-2.0

use rstest::rstest;

use thermoplan::GridDim;

#[rstest]
#[case("4x4", 4, 4, None)]
#[case("8x8x1", 8, 8, Some(1))]
#[case("4x4x2", 4, 4, Some(2))]
#[case("16x2", 16, 2, None)]
fn parses_2d_and_3d_grids(
    #[case] input: &str,
    #[case] x: usize,
    #[case] y: usize,
    #[case] z: Option<usize>,
) {
    let dim: GridDim = input.parse().unwrap();
    assert_eq!((dim.x, dim.y, dim.z), (x, y, z));
}

#[test]
fn depth_defaults_to_one_layer() {
    let dim: GridDim = "4x4".parse().unwrap();
    assert_eq!(dim.depth(), 1);
    assert!(!dim.is_3d());
    assert_eq!(dim.per_layer(), 16);

    let dim: GridDim = "4x4x2".parse().unwrap();
    assert_eq!(dim.depth(), 2);
    assert!(dim.is_3d());
}

#[rstest]
#[case("4")]
#[case("4x")]
#[case("x4")]
#[case("4x4x")]
#[case("4x4x2x2")]
#[case("0x4")]
#[case("4x0")]
#[case("4x4x0")]
#[case("axb")]
fn rejects_malformed_grids(#[case] input: &str) {
    let err = input.parse::<GridDim>().unwrap_err();
    assert!(err.to_string().contains("not a valid dimension"), "{err}");
}

#[test]
fn display_round_trips() {
    assert_eq!("4x4".parse::<GridDim>().unwrap().to_string(), "4x4");
    assert_eq!("4x4x2".parse::<GridDim>().unwrap().to_string(), "4x4x2");
}
