//! Press scene layout
//!
//! Turns parameters and animation offsets into positioned, scaled shapes.
//! Piston and chamber sizes follow the radii (scaled up ×8 so that
//! millimetre pistons are visible), while the pistons, load and input fluid
//! column move by the offsets the animation trigger writes.

use crate::animation::ElementOffsets;
use crate::math::Transform;
use crate::physics::PressParameters;
use glam::{Quat, Vec3};
use std::f32::consts::FRAC_PI_2;

const ROOT_HEIGHT: f32 = 0.2;
const COLUMN_SPACING: f32 = 0.8;
const CHAMBER_HEIGHT: f32 = 0.8;
const PISTON_THICKNESS: f32 = 0.05;
const RADIUS_SCALE: f32 = 8.0;
const INPUT_FLUID_SCALE: f32 = 7.5;
const INPUT_PISTON_SCALE: f32 = 7.2;
const OUTPUT_FLUID_SCALE: f32 = 7.6;
const OUTPUT_PISTON_SCALE: f32 = 7.5;
const OUTPUT_PLATE_SCALE: f32 = 6.0;

/// Rest height of the input piston group, relative to the press root.
pub const INPUT_PISTON_REST: f32 = CHAMBER_HEIGHT - 0.1;
/// Rest height of the output piston group, relative to the press root.
pub const OUTPUT_PISTON_REST: f32 = 0.1 + PISTON_THICKNESS;
pub const LOAD_REST: f32 = 0.3;
pub const FLUID_REST: f32 = -0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Part {
    InputChamber,
    InputFluid,
    InputPiston,
    InputRod,
    InputCap,
    Tube,
    OutputChamber,
    OutputFluid,
    OutputPiston,
    OutputPlate,
    Load,
}

/// Unit primitives the renderer knows how to draw.
///
/// Cylinders have radius 1 and height 1 around the origin; boxes have side 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Cylinder,
    Cube,
    WireCylinder,
    WireCube,
}

impl Shape {
    pub fn is_wireframe(self) -> bool {
        matches!(self, Shape::WireCylinder | Shape::WireCube)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneItem {
    pub part: Part,
    pub shape: Shape,
    pub transform: Transform,
    pub color: [f32; 4],
}

mod palette {
    pub const GLASS: [f32; 4] = [0.85, 0.9, 1.0, 1.0];
    pub const FLUID: [f32; 4] = [0.0, 0.4, 1.0, 1.0];
    pub const PISTON: [f32; 4] = [0.88, 0.88, 0.88, 1.0];
    pub const CAP: [f32; 4] = [1.0, 0.2, 0.0, 1.0];
    pub const TUBE: [f32; 4] = [0.2, 0.2, 0.2, 1.0];
    pub const PLATE: [f32; 4] = [0.07, 0.07, 0.07, 1.0];
    pub const LOAD: [f32; 4] = [0.95, 0.95, 0.95, 1.0];
}

fn cylinder(part: Part, center: Vec3, radius: f32, height: f32, color: [f32; 4]) -> SceneItem {
    SceneItem {
        part,
        shape: Shape::Cylinder,
        transform: Transform::from_position(center).with_scale(Vec3::new(radius, height, radius)),
        color,
    }
}

/// The whole press for one frame.
#[derive(Debug, Clone)]
pub struct PressLayout {
    items: Vec<SceneItem>,
}

impl PressLayout {
    pub fn build(params: &PressParameters, offsets: &ElementOffsets) -> Self {
        let r1 = params.input_radius() as f32;
        let r2 = params.output_radius() as f32;
        let input_x = -COLUMN_SPACING;
        let output_x = COLUMN_SPACING;
        let chamber_center = ROOT_HEIGHT + CHAMBER_HEIGHT / 2.0;
        let fluid_height = CHAMBER_HEIGHT * 0.9;

        let mut items = Vec::with_capacity(11);

        let mut input_chamber = cylinder(
            Part::InputChamber,
            Vec3::new(input_x, chamber_center, 0.0),
            r1 * RADIUS_SCALE,
            CHAMBER_HEIGHT,
            palette::GLASS,
        );
        input_chamber.shape = Shape::WireCylinder;
        items.push(input_chamber);

        let fluid_y = ROOT_HEIGHT + FLUID_REST + offsets.fluid + CHAMBER_HEIGHT / 2.0;
        items.push(cylinder(
            Part::InputFluid,
            Vec3::new(input_x, fluid_y, 0.0),
            r1 * INPUT_FLUID_SCALE,
            fluid_height,
            palette::FLUID,
        ));

        let piston_y = ROOT_HEIGHT + INPUT_PISTON_REST + offsets.input_piston;
        items.push(cylinder(
            Part::InputPiston,
            Vec3::new(input_x, piston_y, 0.0),
            r1 * INPUT_PISTON_SCALE,
            PISTON_THICKNESS,
            palette::PISTON,
        ));
        items.push(cylinder(
            Part::InputRod,
            Vec3::new(input_x, piston_y + 0.4, 0.0),
            0.03,
            0.8,
            palette::PISTON,
        ));
        items.push(cylinder(
            Part::InputCap,
            Vec3::new(input_x, piston_y + 0.8, 0.0),
            0.15,
            0.02,
            palette::CAP,
        ));

        let mut tube = cylinder(
            Part::Tube,
            Vec3::new(0.0, ROOT_HEIGHT + 0.1, 0.0),
            0.05,
            COLUMN_SPACING * 2.0,
            palette::TUBE,
        );
        tube.transform = tube.transform.with_rotation(Quat::from_rotation_z(FRAC_PI_2));
        items.push(tube);

        let mut output_chamber = cylinder(
            Part::OutputChamber,
            Vec3::new(output_x, chamber_center, 0.0),
            r2 * RADIUS_SCALE,
            CHAMBER_HEIGHT,
            palette::GLASS,
        );
        output_chamber.shape = Shape::WireCylinder;
        items.push(output_chamber);

        items.push(cylinder(
            Part::OutputFluid,
            Vec3::new(output_x, chamber_center - 0.05, 0.0),
            r2 * OUTPUT_FLUID_SCALE,
            fluid_height,
            palette::FLUID,
        ));

        let output_y = ROOT_HEIGHT + OUTPUT_PISTON_REST + offsets.output_piston;
        items.push(cylinder(
            Part::OutputPiston,
            Vec3::new(output_x, output_y, 0.0),
            r2 * OUTPUT_PISTON_SCALE,
            PISTON_THICKNESS,
            palette::PISTON,
        ));
        items.push(cylinder(
            Part::OutputPlate,
            Vec3::new(output_x, output_y + 0.05, 0.0),
            r2 * OUTPUT_PLATE_SCALE,
            0.02,
            palette::PLATE,
        ));

        items.push(SceneItem {
            part: Part::Load,
            shape: Shape::Cube,
            transform: Transform::from_position(Vec3::new(
                output_x,
                ROOT_HEIGHT + LOAD_REST + offsets.load,
                0.0,
            ))
            .with_scale(Vec3::splat(0.4)),
            color: palette::LOAD,
        });

        Self { items }
    }

    pub fn items(&self) -> &[SceneItem] {
        &self.items
    }

    pub fn item(&self, part: Part) -> Option<&SceneItem> {
        self.items.iter().find(|item| item.part == part)
    }

    /// Solid parts first, then wireframes, the order the renderer draws them.
    pub fn draw_order(&self) -> impl Iterator<Item = &SceneItem> + '_ {
        let solids = self.items.iter().filter(|i| !i.shape.is_wireframe());
        let wires = self.items.iter().filter(|i| i.shape.is_wireframe());
        solids.chain(wires)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::Parameter;

    fn y_of(layout: &PressLayout, part: Part) -> f32 {
        layout.item(part).unwrap().transform.position.y
    }

    #[test]
    fn test_rest_layout() {
        let layout = PressLayout::build(&PressParameters::DEFAULT, &ElementOffsets::BASELINE);
        assert_eq!(layout.items().len(), 11);
        assert!((y_of(&layout, Part::InputPiston) - 0.9).abs() < 1e-6);
        assert!((y_of(&layout, Part::OutputPiston) - 0.35).abs() < 1e-6);
        assert!((y_of(&layout, Part::Load) - 0.5).abs() < 1e-6);

        let chamber = layout.item(Part::OutputChamber).unwrap();
        assert!((chamber.transform.scale.x - 0.8).abs() < 1e-6);
        assert!(chamber.shape.is_wireframe());
    }

    #[test]
    fn test_offsets_move_groups_together() {
        let offsets = ElementOffsets {
            input_piston: -0.1,
            output_piston: 0.004,
            load: 0.004,
            fluid: -0.05,
            ..ElementOffsets::BASELINE
        };
        let rest = PressLayout::build(&PressParameters::DEFAULT, &ElementOffsets::BASELINE);
        let moved = PressLayout::build(&PressParameters::DEFAULT, &offsets);

        for (part, delta) in [
            (Part::InputPiston, -0.1),
            (Part::InputRod, -0.1),
            (Part::InputCap, -0.1),
            (Part::InputFluid, -0.05),
            (Part::OutputPiston, 0.004),
            (Part::OutputPlate, 0.004),
            (Part::Load, 0.004),
            (Part::OutputFluid, 0.0),
            (Part::Tube, 0.0),
        ] {
            let shift = y_of(&moved, part) - y_of(&rest, part);
            assert!((shift - delta).abs() < 1e-6, "{part:?} moved by {shift}");
        }
    }

    #[test]
    fn test_radii_follow_parameters() {
        let params = PressParameters::DEFAULT
            .with(Parameter::InputRadius, 0.04)
            .unwrap();
        let layout = PressLayout::build(&params, &ElementOffsets::BASELINE);
        let piston = layout.item(Part::InputPiston).unwrap();
        assert!((piston.transform.scale.x - 0.04 * INPUT_PISTON_SCALE).abs() < 1e-6);
    }

    #[test]
    fn test_parts_nest_inside_their_chambers() {
        let layout = PressLayout::build(&PressParameters::DEFAULT, &ElementOffsets::BASELINE);
        let radius = |part| layout.item(part).unwrap().transform.scale.x;

        assert!(radius(Part::InputChamber) > radius(Part::InputFluid));
        assert!(radius(Part::InputFluid) > radius(Part::InputPiston));
        assert!(radius(Part::OutputChamber) > radius(Part::OutputFluid));
        assert!(radius(Part::OutputFluid) > radius(Part::OutputPiston));
        assert!(radius(Part::OutputPiston) > radius(Part::OutputPlate));
        assert!((radius(Part::OutputPlate) - 0.1 * OUTPUT_PLATE_SCALE).abs() < 1e-6);
    }

    #[test]
    fn test_draw_order_puts_wireframes_last() {
        let layout = PressLayout::build(&PressParameters::DEFAULT, &ElementOffsets::BASELINE);
        let shapes: Vec<bool> = layout.draw_order().map(|i| i.shape.is_wireframe()).collect();
        let first_wire = shapes.iter().position(|w| *w).unwrap();
        assert!(shapes[first_wire..].iter().all(|w| *w));
    }
}
