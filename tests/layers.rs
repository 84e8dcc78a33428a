// SPDX-License-Identifier: Apache-2.0

use rstest::rstest;

use thermoplan::{
    CoreMemControllerLayer, Floorplan, FloorplanComponent, ForcedSides, GridKind, GridLayer,
    Length, PaddedLayer,
};

fn mm(v: f64) -> Length {
    Length::from_micrometers(v * 1e3)
}

fn find<'a>(components: &'a [FloorplanComponent], name: &str) -> &'a FloorplanComponent {
    components
        .iter()
        .find(|c| c.name == name)
        .unwrap_or_else(|| panic!("no component named {name}"))
}

#[test]
fn grid_is_laid_out_row_major() {
    let layer = GridLayer::new(GridKind::Core, "cores_1", 2, 2, mm(2.0), mm(1.0), mm(0.05));
    let components = layer.components();
    assert_eq!(components.len(), 4);

    assert_eq!(components[0].name, "C_0");
    assert_eq!((components[0].left, components[0].bottom), (mm(0.0), mm(0.0)));
    assert_eq!(components[1].name, "C_1");
    assert_eq!((components[1].left, components[1].bottom), (mm(2.0), mm(0.0)));
    assert_eq!(components[2].name, "C_2");
    assert_eq!((components[2].left, components[2].bottom), (mm(0.0), mm(1.0)));
    assert_eq!(components[3].name, "C_3");
    assert_eq!((components[3].left, components[3].bottom), (mm(2.0), mm(1.0)));

    assert_eq!(layer.total_width(), mm(4.0));
    assert_eq!(layer.total_height(), mm(2.0));
}

#[test]
fn nb_offset_keeps_ids_unique_across_layers() {
    let layer = GridLayer::new(GridKind::Core, "cores_2", 2, 2, mm(1.0), mm(1.0), mm(0.05))
        .with_nb_offset(4);
    let names: Vec<_> = layer.components().iter().map(|c| c.name.clone()).collect();
    assert_eq!(names, ["C_4", "C_5", "C_6", "C_7"]);
}

#[rstest]
#[case(GridKind::Core, "C_0")]
#[case(GridKind::MemoryBank, "B_0")]
#[case(GridKind::MemoryController, "LC_0")]
#[case(GridKind::Tim, "TB_0")]
#[case(GridKind::Interposer, "I_0")]
fn element_ids_use_the_kind_prefix(#[case] kind: GridKind, #[case] expected: &str) {
    let layer = GridLayer::new(kind, "layer", 1, 1, mm(1.0), mm(1.0), mm(0.05));
    assert_eq!(layer.components()[0].name, expected);
}

#[test]
fn pos_offset_shifts_every_element() {
    let layer = GridLayer::new(GridKind::MemoryBank, "mem_1", 2, 1, mm(1.0), mm(1.0), mm(0.05))
        .with_pos_offset(mm(5.0), mm(1.0));
    let components = layer.components();
    assert_eq!((components[0].left, components[0].bottom), (mm(5.0), mm(1.0)));
    assert_eq!((components[1].left, components[1].bottom), (mm(6.0), mm(1.0)));
}

fn two_part_template() -> Floorplan {
    Floorplan::new(vec![
        FloorplanComponent::new("exe", mm(2.155), mm(2.08), mm(0.0), mm(0.0)),
        FloorplanComponent::new("mem", mm(2.155), mm(2.08), mm(2.155), mm(0.0)),
    ])
}

#[test]
fn template_is_replicated_into_every_cell() {
    let layer = GridLayer::new(GridKind::Core, "cores_1", 2, 1, mm(4.31), mm(2.08), mm(0.05))
        .with_template(two_part_template())
        .unwrap();
    let components = layer.components();
    assert_eq!(components.len(), 4);

    let c0_exe = find(&components, "C_0_exe");
    assert_eq!((c0_exe.left, c0_exe.bottom), (mm(0.0), mm(0.0)));
    let c0_mem = find(&components, "C_0_mem");
    assert_eq!((c0_mem.left, c0_mem.bottom), (mm(2.155), mm(0.0)));
    let c1_exe = find(&components, "C_1_exe");
    assert_eq!((c1_exe.left, c1_exe.bottom), (mm(4.31), mm(0.0)));
    let c1_mem = find(&components, "C_1_mem");
    assert_eq!((c1_mem.left, c1_mem.bottom), (mm(6.465), mm(0.0)));
}

#[test]
fn template_must_match_the_element_size() {
    let err = GridLayer::new(GridKind::Core, "cores_1", 2, 1, mm(5.0), mm(2.0), mm(0.05))
        .with_template(two_part_template())
        .unwrap_err();
    assert!(err.to_string().contains("does not match"), "{err}");
}

#[test]
fn template_must_be_anchored_bottom_left() {
    let template = Floorplan::new(vec![FloorplanComponent::new(
        "exe",
        mm(1.0),
        mm(1.0),
        mm(1.0),
        mm(0.0),
    )]);
    let err = GridLayer::new(GridKind::Core, "cores_1", 1, 1, mm(1.0), mm(1.0), mm(0.05))
        .with_template(template)
        .unwrap_err();
    assert!(err.to_string().contains("bottom left"), "{err}");
}

#[test]
fn core_mem_layer_centers_the_shorter_controller_grid() {
    // 2x2 cores of 2x2mm (4x4mm) next to 2x2 controllers of 1x1mm (2x2mm).
    let cores = GridLayer::new(GridKind::Core, "cores", 2, 2, mm(2.0), mm(2.0), mm(0.05));
    let controllers =
        GridLayer::new(GridKind::MemoryController, "mc", 2, 2, mm(1.0), mm(1.0), mm(0.05));
    let layer = CoreMemControllerLayer::new("cores_mc", cores, controllers, mm(1.0), mm(0.05));

    assert_eq!(layer.total_width(), mm(7.0));
    assert_eq!(layer.total_height(), mm(4.0));
    assert_eq!(layer.controller_offset(), (mm(5.0), mm(1.0)));

    let components = layer.components();
    // 4 cores + 4 controllers + gap + below + above.
    assert_eq!(components.len(), 11);

    let first_controller = find(&components, "LC_0");
    assert_eq!((first_controller.left, first_controller.bottom), (mm(5.0), mm(1.0)));

    let gap = find(&components, "air_gap");
    assert_eq!((gap.width, gap.height), (mm(1.0), mm(4.0)));
    assert_eq!((gap.left, gap.bottom), (mm(4.0), mm(0.0)));

    let below = find(&components, "air_bottom");
    assert_eq!((below.width, below.height), (mm(2.0), mm(1.0)));
    assert_eq!((below.left, below.bottom), (mm(5.0), mm(0.0)));

    let above = find(&components, "air_top");
    assert_eq!((above.width, above.height), (mm(2.0), mm(1.0)));
    assert_eq!((above.left, above.bottom), (mm(5.0), mm(3.0)));
}

#[test]
fn core_mem_layer_centers_the_shorter_core_grid() {
    // Mirror case: the controller grid is taller than the core grid.
    let cores = GridLayer::new(GridKind::Core, "cores", 2, 1, mm(2.0), mm(2.0), mm(0.05));
    let controllers =
        GridLayer::new(GridKind::MemoryController, "mc", 1, 4, mm(1.0), mm(1.0), mm(0.05));
    let layer = CoreMemControllerLayer::new("cores_mc", cores, controllers, mm(1.0), mm(0.05));

    assert_eq!(layer.total_width(), mm(6.0));
    assert_eq!(layer.total_height(), mm(4.0));
    assert_eq!(layer.controller_offset(), (mm(5.0), mm(0.0)));

    let components = layer.components();
    let first_core = find(&components, "C_0");
    assert_eq!((first_core.left, first_core.bottom), (mm(0.0), mm(1.0)));

    let below = find(&components, "air_bottom");
    assert_eq!((below.width, below.height), (mm(4.0), mm(1.0)));
    assert_eq!((below.left, below.bottom), (mm(0.0), mm(0.0)));

    let above = find(&components, "air_top");
    assert_eq!((above.left, above.bottom), (mm(0.0), mm(3.0)));
}

#[test]
fn core_mem_layer_with_equal_heights_emits_only_the_gap() {
    let cores = GridLayer::new(GridKind::Core, "cores", 2, 1, mm(2.0), mm(2.0), mm(0.05));
    let controllers =
        GridLayer::new(GridKind::MemoryController, "mc", 2, 2, mm(1.0), mm(1.0), mm(0.05));
    let layer = CoreMemControllerLayer::new("cores_mc", cores, controllers, mm(1.0), mm(0.05));

    let air: Vec<_> = layer
        .components()
        .into_iter()
        .filter(|c| c.name.starts_with("air"))
        .collect();
    assert_eq!(air.len(), 1);
    assert_eq!(air[0].name, "air_gap");
}

#[test]
fn padding_fills_strictly_positive_gaps() {
    let content = GridLayer::new(GridKind::MemoryBank, "mem_1", 2, 2, mm(1.0), mm(1.0), mm(0.05))
        .with_pos_offset(mm(2.0), mm(1.0));
    let layer =
        PaddedLayer::new(content, mm(6.0), mm(4.0), ForcedSides::default()).unwrap();
    let components = layer.components();

    let left = find(&components, "air_left");
    assert_eq!((left.width, left.height), (mm(2.0), mm(4.0)));
    assert_eq!((left.left, left.bottom), (mm(0.0), mm(0.0)));

    let right = find(&components, "air_right");
    assert_eq!((right.width, right.height), (mm(2.0), mm(4.0)));
    assert_eq!((right.left, right.bottom), (mm(4.0), mm(0.0)));

    let bottom = find(&components, "air_bottom");
    assert_eq!((bottom.width, bottom.height), (mm(2.0), mm(1.0)));
    assert_eq!((bottom.left, bottom.bottom), (mm(2.0), mm(0.0)));

    let top = find(&components, "air_top");
    assert_eq!((top.width, top.height), (mm(2.0), mm(1.0)));
    assert_eq!((top.left, top.bottom), (mm(2.0), mm(3.0)));
}

#[test]
fn padding_omits_zero_gaps_unless_forced() {
    let content = GridLayer::new(GridKind::MemoryBank, "mem_1", 2, 2, mm(1.0), mm(1.0), mm(0.05));
    let layer =
        PaddedLayer::new(content.clone(), mm(2.0), mm(2.0), ForcedSides::default()).unwrap();
    assert!(layer.components().iter().all(|c| !c.name.starts_with("air")));

    let forced = PaddedLayer::new(
        content,
        mm(2.0),
        mm(2.0),
        ForcedSides {
            right: true,
            ..ForcedSides::default()
        },
    )
    .unwrap();
    let components = forced.components();
    let right = find(&components, "air_right");
    assert_eq!(right.width, mm(0.0));
    assert_eq!(right.left, mm(2.0));
}

#[test]
fn forcing_a_side_with_a_positive_gap_emits_exactly_one_rectangle() {
    let content = GridLayer::new(GridKind::MemoryBank, "mem_1", 1, 1, mm(1.0), mm(1.0), mm(0.05))
        .with_pos_offset(mm(1.0), mm(0.0));
    let layer = PaddedLayer::new(
        content,
        mm(3.0),
        mm(1.0),
        ForcedSides {
            left: true,
            right: true,
            ..ForcedSides::default()
        },
    )
    .unwrap();
    let components = layer.components();

    assert_eq!(components.iter().filter(|c| c.name == "air_left").count(), 1);
    assert_eq!(components.iter().filter(|c| c.name == "air_right").count(), 1);
    assert_eq!(find(&components, "air_left").width, mm(1.0));
    assert_eq!(find(&components, "air_right").width, mm(1.0));
}

#[test]
fn padding_rejects_content_larger_than_the_target() {
    let content = GridLayer::new(GridKind::MemoryBank, "mem_1", 4, 1, mm(1.0), mm(1.0), mm(0.05));
    let err =
        PaddedLayer::new(content, mm(3.0), mm(1.0), ForcedSides::default()).unwrap_err();
    assert!(err.to_string().contains("does not fit"), "{err}");
}
