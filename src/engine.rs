//! The packing engine.
//!
//! Strictly single-threaded and synchronous: a single call runs start to
//! finish with no suspension points and no shared mutable state, so
//! concurrent invocations (one per incoming request) are race-free by
//! construction. Nothing here touches a file, a socket, or global state.

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{Axis, Bed, BoxPlacement, BoxSpec, Orientation, PlacedBox, Placement, Settings, Strategy};
use crate::geometry::{self, collides_with_padding, intersects_rounded_corner, Cuboid};

/// Aggregate quality metrics for a completed (or attempted) packing run.
#[derive(Clone, Copy, Debug, Serialize, ToSchema)]
pub struct Metrics {
    pub total_boxes: usize,
    pub placed_boxes: usize,
    pub used_volume_ratio: f64,
    pub free_volume_ratio: f64,
    pub fragmentation_score: f64,
}

impl Metrics {
    /// Whether every input box was placed.
    pub fn is_complete(&self) -> bool {
        self.placed_boxes == self.total_boxes
    }

    /// Fraction of input boxes that were placed, in [0, 1]. 1.0 when there
    /// were no boxes to place.
    pub fn placement_rate(&self) -> f64 {
        if self.total_boxes == 0 {
            1.0
        } else {
            self.placed_boxes as f64 / self.total_boxes as f64
        }
    }
}

/// The full result of a packing run.
#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct PackResult {
    pub placements: Vec<BoxPlacement>,
    pub unplaced_box_ids: Vec<String>,
    pub metrics: Metrics,
}

/// Emitted during a progress-reporting run, for the streaming API surface.
#[derive(Clone, Debug, Serialize, ToSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PackEvent {
    Placed { box_id: String, placement: Placement },
    Unplaced { box_id: String },
    Finished { result: PackResult },
}

/// Axis-aligned cuboid describing the usable interior of the bed, after
/// shrinking by margin + settings margin on the four lateral sides.
#[derive(Clone, Copy, Debug)]
struct UsableSpace {
    x: f64,
    y: f64,
    z: f64,
    length: f64,
    width: f64,
    height: f64,
}

impl UsableSpace {
    fn x_end(&self) -> f64 {
        self.x + self.length
    }
    fn y_end(&self) -> f64 {
        self.y + self.width
    }
    fn z_end(&self) -> f64 {
        self.z + self.height
    }
}

/// Returns every distinct (placed_length, placed_width, placed_height,
/// orientation) triple allowed by the box's rotation flags, in a fixed
/// enumeration order with the identity orientation first.
pub fn enumerate_orientations(spec: &BoxSpec) -> Vec<(f64, f64, f64, Orientation)> {
    const PERMUTATIONS: [(Axis, Axis, Axis); 6] = [
        (Axis::Length, Axis::Width, Axis::Height),
        (Axis::Length, Axis::Height, Axis::Width),
        (Axis::Width, Axis::Length, Axis::Height),
        (Axis::Width, Axis::Height, Axis::Length),
        (Axis::Height, Axis::Length, Axis::Width),
        (Axis::Height, Axis::Width, Axis::Length),
    ];

    let dim = |axis: Axis| match axis {
        Axis::Length => spec.length,
        Axis::Width => spec.width,
        Axis::Height => spec.height,
    };

    let mut orientations: Vec<(f64, f64, f64, Orientation)> = Vec::with_capacity(6);

    for (l_axis, w_axis, h_axis) in PERMUTATIONS {
        let is_identity = l_axis == Axis::Length && w_axis == Axis::Width && h_axis == Axis::Height;

        let allowed = if is_identity {
            true
        } else {
            let mut allowed = true;
            if l_axis != Axis::Length || w_axis != Axis::Width {
                allowed &= spec.can_rotate_z;
            }
            if h_axis != Axis::Height {
                if w_axis == Axis::Height || h_axis == Axis::Width {
                    allowed &= spec.can_rotate_x;
                }
                if l_axis == Axis::Height || h_axis == Axis::Length {
                    allowed &= spec.can_rotate_y;
                }
            }
            allowed
        };

        if !allowed {
            continue;
        }

        let placed = (dim(l_axis), dim(w_axis), dim(h_axis));
        let is_duplicate = orientations.iter().any(|(ol, ow, oh, _)| {
            (placed.0 - ol).abs() < geometry::EPSILON_ORIENTATION
                && (placed.1 - ow).abs() < geometry::EPSILON_ORIENTATION
                && (placed.2 - oh).abs() < geometry::EPSILON_ORIENTATION
        });
        if is_duplicate {
            continue;
        }

        orientations.push((
            placed.0,
            placed.1,
            placed.2,
            Orientation {
                length_axis: l_axis,
                width_axis: w_axis,
                height_axis: h_axis,
            },
        ));
    }

    orientations
}

/// Box-ordering heuristic score (spec §4.5). Lower sorts first.
fn box_order_score(spec: &BoxSpec, accessibility_preference: f64) -> f64 {
    spec.priority.order_score()
        - spec.weight * 10.0
        + spec.fragility.order_score()
        + spec.access_frequency.order_score() * accessibility_preference
        - spec.volume() * 0.01
}

/// Support ratio and supporting set at a candidate footprint (spec §4.3).
fn support_at_position<'a>(
    x: f64,
    y: f64,
    z: f64,
    length: f64,
    width: f64,
    placed: &'a [PlacedBox<'a>],
    floor_z: f64,
    padding: f64,
) -> (f64, Vec<&'a PlacedBox<'a>>) {
    if z <= floor_z + geometry::EPSILON_FLOOR {
        return (1.0, Vec::new());
    }

    let footprint_area = length * width;
    if footprint_area <= 0.0 {
        return (0.0, Vec::new());
    }

    let mut supported_area = 0.0;
    let mut supporting = Vec::new();

    for record in placed {
        if (record.z_end() + padding - z).abs() > geometry::EPSILON_SUPPORT {
            continue;
        }

        let candidate = Cuboid::new(x, y, z, length, width, 0.0);
        let other = record.footprint_and_height();
        let overlap = geometry::overlap_area_xy(&candidate, &other);
        if overlap > 0.0 {
            supported_area += overlap;
            supporting.push(record);
        }
    }

    ((supported_area / footprint_area).min(1.0), supporting)
}

/// Checks that placing `candidate_weight` on top of every box in
/// `supporting` would not exceed that box's effective load limit, counting
/// everything already resting directly on it (spec §4.3's load check — not
/// propagated transitively beyond one level).
fn check_load_constraint<'a>(
    candidate_weight: f64,
    supporting: &[&'a PlacedBox<'a>],
    placed: &'a [PlacedBox<'a>],
    floor_z: f64,
    padding: f64,
) -> bool {
    for &support in supporting {
        let limit = support.spec.effective_max_supported_load();

        let mut current_load = 0.0;
        for other in placed {
            if other.placement.z <= support.z_end() - geometry::EPSILON_SUPPORT {
                continue;
            }
            let (_, supporters) = support_at_position(
                other.placement.x,
                other.placement.y,
                other.placement.z,
                other.placed_length,
                other.placed_width,
                std::slice::from_ref(support),
                floor_z,
                padding,
            );
            if !supporters.is_empty() {
                current_load += other.spec.weight;
            }
        }

        if current_load + candidate_weight > limit {
            return false;
        }
    }

    true
}

/// Fragility constraint (spec §4.3): fixed 5 kg / 15 kg thresholds.
fn check_fragility_constraint(candidate_weight: f64, supporting: &[&PlacedBox]) -> bool {
    for support in supporting {
        match support.spec.fragility {
            crate::domain::Fragility::Fragile if candidate_weight > 5.0 => return false,
            crate::domain::Fragility::Normal if candidate_weight > 15.0 => return false,
            _ => {}
        }
    }
    true
}

/// Finds the best feasible position for `spec` at the given placed
/// dimensions, or `None` if no candidate position is feasible (spec §4.4).
#[allow(clippy::too_many_arguments)]
fn find_placement_position<'a>(
    spec: &BoxSpec,
    placed_length: f64,
    placed_width: f64,
    placed_height: f64,
    placed: &'a [PlacedBox<'a>],
    usable: &UsableSpace,
    padding: f64,
    strategy: Strategy,
    bed: &Bed,
    total_margin: f64,
) -> Option<(f64, f64, f64)> {
    let mut candidates: Vec<(f64, f64, f64)> = Vec::with_capacity(1 + 3 * placed.len());
    candidates.push((usable.x, usable.y, usable.z));
    for record in placed {
        candidates.push((record.x_end() + padding, record.placement.y, record.placement.z));
        candidates.push((record.placement.x, record.y_end() + padding, record.placement.z));
        candidates.push((record.placement.x, record.placement.y, record.z_end() + padding));
    }

    let mut best: Option<(f64, f64, f64, f64)> = None;

    for (x, y, z) in candidates {
        if x < usable.x || x + placed_length > usable.x_end() {
            continue;
        }
        if y < usable.y || y + placed_width > usable.y_end() {
            continue;
        }
        if z < usable.z || z + placed_height > usable.z_end() {
            continue;
        }

        if intersects_rounded_corner(
            x,
            y,
            placed_length,
            placed_width,
            bed.length,
            bed.width,
            bed.corner_radius,
            total_margin,
        ) {
            continue;
        }

        let candidate_cuboid = Cuboid::new(x, y, z, placed_length, placed_width, placed_height);
        let collides = placed
            .iter()
            .any(|r| collides_with_padding(&candidate_cuboid, &r.footprint_and_height(), padding));
        if collides {
            continue;
        }

        let (support_ratio, supporting) =
            support_at_position(x, y, z, placed_length, placed_width, placed, usable.z, padding);

        if z > usable.z + geometry::EPSILON_SUPPORT && support_ratio < 0.5 {
            continue;
        }

        if !check_load_constraint(spec.weight, &supporting, placed, usable.z, padding) {
            continue;
        }
        if !check_fragility_constraint(spec.weight, &supporting) {
            continue;
        }

        let score = match strategy {
            Strategy::MaximizeVolume => x + y * 0.1 + z * 0.01,
            Strategy::MinimizeHoles => {
                let mut adjacency = 0.0;
                for r in placed {
                    if (x - r.x_end() - padding).abs() < geometry::EPSILON_SUPPORT {
                        adjacency -= 10.0;
                    }
                    if (y - r.y_end() - padding).abs() < geometry::EPSILON_SUPPORT {
                        adjacency -= 10.0;
                    }
                    if (z - r.z_end()).abs() < geometry::EPSILON_SUPPORT {
                        adjacency -= 5.0;
                    }
                }
                x + y * 0.1 + z * 0.01 + adjacency
            }
        };

        if best.map(|(_, _, _, s)| score < s).unwrap_or(true) {
            best = Some((x, y, z, score));
        }
    }

    best.map(|(x, y, z, _)| (x, y, z))
}

fn clamp_usable_volume(length: f64, width: f64, height: f64) -> f64 {
    let volume = length * width * height;
    if volume <= 0.0 {
        1.0
    } else {
        volume
    }
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

fn compute_metrics(total_boxes: usize, placed: &[PlacedBox], usable_volume: f64) -> Metrics {
    let used_volume: f64 = placed.iter().map(|p| p.volume()).sum();
    let used_volume_ratio = (used_volume / usable_volume).min(1.0);
    let free_volume_ratio = 1.0 - used_volume_ratio;

    let fragmentation_score = if placed.is_empty() {
        1.0
    } else {
        let min_x = placed.iter().map(|p| p.placement.x).fold(f64::INFINITY, f64::min);
        let max_x = placed.iter().map(|p| p.x_end()).fold(f64::NEG_INFINITY, f64::max);
        let min_y = placed.iter().map(|p| p.placement.y).fold(f64::INFINITY, f64::min);
        let max_y = placed.iter().map(|p| p.y_end()).fold(f64::NEG_INFINITY, f64::max);
        let min_z = placed.iter().map(|p| p.placement.z).fold(f64::INFINITY, f64::min);
        let max_z = placed.iter().map(|p| p.z_end()).fold(f64::NEG_INFINITY, f64::max);

        let bounding_volume = (max_x - min_x) * (max_y - min_y) * (max_z - min_z);
        if bounding_volume > 0.0 {
            1.0 - used_volume / bounding_volume
        } else {
            0.0
        }
    };

    Metrics {
        total_boxes,
        placed_boxes: placed.len(),
        used_volume_ratio: round4(used_volume_ratio),
        free_volume_ratio: round4(free_volume_ratio),
        fragmentation_score: round4(fragmentation_score),
    }
}

/// Runs the packing engine to completion.
pub fn optimize_packing(bed: &Bed, boxes: &[BoxSpec], settings: &Settings) -> PackResult {
    let mut result = None;
    optimize_packing_with_progress(bed, boxes, settings, |event| {
        if let PackEvent::Finished { result: r } = event {
            result = Some(r);
        }
    });
    result.expect("optimize_packing_with_progress always emits Finished")
}

/// Runs the packing engine, invoking `on_event` after each box is attempted
/// and once more with the final result. Used by the streaming API surface.
pub fn optimize_packing_with_progress(
    bed: &Bed,
    boxes: &[BoxSpec],
    settings: &Settings,
    mut on_event: impl FnMut(PackEvent),
) {
    let total_margin = bed.margin + settings.margin;
    let usable_length = bed.length - 2.0 * total_margin;
    let usable_width = bed.width - 2.0 * total_margin;
    let usable_height = bed.height;

    if usable_length <= 0.0 || usable_width <= 0.0 || usable_height <= 0.0 {
        let metrics = compute_metrics(boxes.len(), &[], 1.0);
        for spec in boxes {
            on_event(PackEvent::Unplaced { box_id: spec.id.clone() });
        }
        on_event(PackEvent::Finished {
            result: PackResult {
                placements: Vec::new(),
                unplaced_box_ids: boxes.iter().map(|b| b.id.clone()).collect(),
                metrics,
            },
        });
        return;
    }

    let usable = UsableSpace {
        x: total_margin,
        y: total_margin,
        z: 0.0,
        length: usable_length,
        width: usable_width,
        height: usable_height,
    };

    let mut order: Vec<&BoxSpec> = boxes.iter().collect();
    order.sort_by(|a, b| {
        box_order_score(a, settings.accessibility_preference)
            .partial_cmp(&box_order_score(b, settings.accessibility_preference))
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut placed_records: Vec<PlacedBox> = Vec::with_capacity(boxes.len());
    let mut placements: Vec<BoxPlacement> = Vec::with_capacity(boxes.len());
    let mut unplaced_box_ids: Vec<String> = Vec::new();

    for spec in order {
        let mut best: Option<(f64, f64, f64, Orientation, f64, f64, f64, f64)> = None;

        for (length, width, height, orientation) in enumerate_orientations(spec) {
            if length > usable_length || width > usable_width || height > usable_height {
                continue;
            }

            if let Some((x, y, z)) = find_placement_position(
                spec,
                length,
                width,
                height,
                &placed_records,
                &usable,
                settings.padding,
                settings.strategy,
                bed,
                total_margin,
            ) {
                let score = z * 1000.0 + x + y * 0.1;
                if best.map(|(.., s)| score < s).unwrap_or(true) {
                    best = Some((x, y, z, orientation, length, width, height, score));
                }
            }
        }

        if let Some((x, y, z, orientation, length, width, height, _)) = best {
            let placement = Placement { x, y, z, orientation };
            placed_records.push(PlacedBox {
                spec,
                placement,
                placed_length: length,
                placed_width: width,
                placed_height: height,
            });
            placements.push(BoxPlacement {
                box_id: spec.id.clone(),
                placement,
            });
            on_event(PackEvent::Placed { box_id: spec.id.clone(), placement });
        } else {
            unplaced_box_ids.push(spec.id.clone());
            on_event(PackEvent::Unplaced { box_id: spec.id.clone() });
        }
    }

    let usable_volume = clamp_usable_volume(usable_length, usable_width, usable_height);
    let metrics = compute_metrics(boxes.len(), &placed_records, usable_volume);

    on_event(PackEvent::Finished {
        result: PackResult {
            placements,
            unplaced_box_ids,
            metrics,
        },
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AccessFrequency, Fragility, Priority};

    fn box_spec(id: &str, l: f64, w: f64, h: f64, weight: f64, fragility: Fragility, priority: Priority) -> BoxSpec {
        BoxSpec {
            id: id.to_string(),
            name: id.to_string(),
            length: l,
            width: w,
            height: h,
            weight,
            fragility,
            access_frequency: AccessFrequency::Rare,
            priority,
            can_rotate_x: true,
            can_rotate_y: true,
            can_rotate_z: true,
            max_supported_load: None,
        }
    }

    fn bed(length: f64, width: f64, height: f64, margin: f64) -> Bed {
        Bed { length, width, height, margin, corner_radius: 0.0 }
    }

    fn settings(strategy: Strategy, padding: f64) -> Settings {
        Settings { strategy, accessibility_preference: 0.5, padding, margin: 0.0 }
    }

    #[test]
    fn orientation_enumerator_identity_always_present() {
        let spec = box_spec("a", 10.0, 20.0, 30.0, 1.0, Fragility::Robust, Priority::MustFit);
        let orientations = enumerate_orientations(&spec);
        assert!(orientations.iter().any(|(l, w, h, o)| {
            *l == 10.0 && *w == 20.0 && *h == 30.0 && *o == Orientation::identity()
        }));
    }

    #[test]
    fn orientation_enumerator_dedupes_cubes() {
        let spec = box_spec("cube", 10.0, 10.0, 10.0, 1.0, Fragility::Robust, Priority::MustFit);
        assert_eq!(enumerate_orientations(&spec).len(), 1);
    }

    #[test]
    fn orientation_enumerator_respects_no_rotation() {
        let mut spec = box_spec("rigid", 10.0, 20.0, 30.0, 1.0, Fragility::Robust, Priority::MustFit);
        spec.can_rotate_x = false;
        spec.can_rotate_y = false;
        spec.can_rotate_z = false;
        let orientations = enumerate_orientations(&spec);
        assert_eq!(orientations.len(), 1);
        assert_eq!(orientations[0].3, Orientation::identity());
    }

    #[test]
    fn empty_input_yields_empty_everything() {
        let bed = bed(200.0, 150.0, 30.0, 5.0);
        let settings = settings(Strategy::MaximizeVolume, 1.0);
        let result = optimize_packing(&bed, &[], &settings);
        assert!(result.placements.is_empty());
        assert!(result.unplaced_box_ids.is_empty());
        assert_eq!(result.metrics.total_boxes, 0);
        assert_eq!(result.metrics.placed_boxes, 0);
    }

    #[test]
    fn single_fitting_box_lands_on_floor() {
        let bed = bed(200.0, 150.0, 30.0, 5.0);
        let settings = settings(Strategy::MaximizeVolume, 1.0);
        let spec = box_spec("box1", 50.0, 40.0, 20.0, 5.0, Fragility::Robust, Priority::MustFit);
        let result = optimize_packing(&bed, std::slice::from_ref(&spec), &settings);
        assert_eq!(result.placements.len(), 1);
        assert_eq!(result.placements[0].box_id, "box1");
        assert_eq!(result.placements[0].placement.z, 0.0);
        assert!(result.unplaced_box_ids.is_empty());
    }

    #[test]
    fn oversized_unrotatable_box_is_unplaced() {
        let bed = bed(100.0, 80.0, 20.0, 5.0);
        let settings = settings(Strategy::MaximizeVolume, 1.0);
        let mut spec = box_spec("big", 150.0, 100.0, 25.0, 5.0, Fragility::Robust, Priority::MustFit);
        spec.can_rotate_x = false;
        spec.can_rotate_y = false;
        spec.can_rotate_z = false;
        let result = optimize_packing(&bed, std::slice::from_ref(&spec), &settings);
        assert!(result.placements.is_empty());
        assert_eq!(result.unplaced_box_ids, vec!["big".to_string()]);
    }

    #[test]
    fn perfect_vertical_stack() {
        let bed = bed(50.0, 50.0, 30.0, 0.0);
        let settings = settings(Strategy::MaximizeVolume, 0.0);
        let a = box_spec("bottom", 40.0, 40.0, 15.0, 10.0, Fragility::Robust, Priority::MustFit);
        let b = box_spec("top", 35.0, 35.0, 15.0, 5.0, Fragility::Normal, Priority::MustFit);
        let result = optimize_packing(&bed, &[a, b], &settings);
        assert_eq!(result.placements.len(), 2);
        let mut zs: Vec<f64> = result.placements.iter().map(|p| p.placement.z).collect();
        zs.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(zs, vec![0.0, 15.0]);
    }

    #[test]
    fn padding_defeats_stacking() {
        let bed = bed(100.0, 100.0, 30.0, 0.0);
        let settings = settings(Strategy::MaximizeVolume, 2.0);
        let a = box_spec("a", 30.0, 30.0, 15.0, 10.0, Fragility::Robust, Priority::MustFit);
        let b = box_spec("b", 30.0, 30.0, 15.0, 10.0, Fragility::Robust, Priority::MustFit);
        let result = optimize_packing(&bed, &[a, b], &settings);
        assert_eq!(result.placements.len(), 2);
        assert!(result.placements.iter().all(|p| p.placement.z == 0.0));
    }

    #[test]
    fn volumetric_metric_matches_expected_ratio() {
        let bed = bed(100.0, 100.0, 50.0, 0.0);
        let settings = settings(Strategy::MaximizeVolume, 0.0);
        let spec = box_spec("box", 50.0, 50.0, 25.0, 1.0, Fragility::Robust, Priority::MustFit);
        let result = optimize_packing(&bed, std::slice::from_ref(&spec), &settings);
        assert!((result.metrics.used_volume_ratio - 0.125).abs() < 0.0001);
        assert!((result.metrics.free_volume_ratio - 0.875).abs() < 0.0001);
    }

    #[test]
    fn every_input_id_is_placed_or_unplaced_exactly_once() {
        let bed = bed(60.0, 60.0, 20.0, 0.0);
        let settings = settings(Strategy::MinimizeHoles, 1.0);
        let boxes = vec![
            box_spec("a", 30.0, 30.0, 10.0, 5.0, Fragility::Robust, Priority::MustFit),
            box_spec("b", 30.0, 30.0, 10.0, 3.0, Fragility::Normal, Priority::Optional),
            box_spec("c", 100.0, 100.0, 100.0, 1.0, Fragility::Fragile, Priority::Optional),
        ];
        let result = optimize_packing(&bed, &boxes, &settings);
        let mut all_ids: Vec<String> = result
            .placements
            .iter()
            .map(|p| p.box_id.clone())
            .chain(result.unplaced_box_ids.iter().cloned())
            .collect();
        all_ids.sort();
        let mut expected: Vec<String> = boxes.iter().map(|b| b.id.clone()).collect();
        expected.sort();
        assert_eq!(all_ids, expected);
    }

    #[test]
    fn fragile_supporter_rejects_heavy_box_on_top() {
        let bed = bed(50.0, 50.0, 30.0, 0.0);
        let settings = settings(Strategy::MaximizeVolume, 0.0);
        let fragile = box_spec("fragile", 40.0, 40.0, 10.0, 1.0, Fragility::Fragile, Priority::MustFit);
        let heavy = box_spec("heavy", 35.0, 35.0, 10.0, 20.0, Fragility::Robust, Priority::MustFit);
        let result = optimize_packing(&bed, &[fragile, heavy], &settings);
        let heavy_placement = result.placements.iter().find(|p| p.box_id == "heavy");
        if let Some(p) = heavy_placement {
            assert_eq!(p.placement.z, 0.0);
        }
    }

    #[test]
    fn max_supported_load_sends_heavy_box_to_floor_not_onto_weak_box() {
        let bed = bed(60.0, 60.0, 60.0, 5.0);
        let settings = settings(Strategy::MaximizeVolume, 0.0);
        let mut weak = box_spec("weak", 40.0, 40.0, 15.0, 2.0, Fragility::Normal, Priority::MustFit);
        weak.max_supported_load = Some(5.0);
        let heavy = box_spec("heavy", 35.0, 35.0, 15.0, 10.0, Fragility::Robust, Priority::MustFit);
        let result = optimize_packing(&bed, &[weak, heavy], &settings);
        assert_eq!(result.placements.len(), 2);
        let heavy_placement = result.placements.iter().find(|p| p.box_id == "heavy").unwrap();
        assert_eq!(heavy_placement.placement.z, 0.0);
    }

    #[test]
    fn determinism_same_input_same_output() {
        let bed = bed(120.0, 90.0, 40.0, 2.0);
        let settings = settings(Strategy::MinimizeHoles, 0.7);
        let boxes = vec![
            box_spec("a", 30.0, 20.0, 15.0, 4.0, Fragility::Robust, Priority::MustFit),
            box_spec("b", 25.0, 25.0, 10.0, 2.0, Fragility::Normal, Priority::Optional),
            box_spec("c", 40.0, 30.0, 20.0, 8.0, Fragility::Robust, Priority::MustFit),
        ];
        let first = optimize_packing(&bed, &boxes, &settings);
        let second = optimize_packing(&bed, &boxes, &settings);
        assert_eq!(first.unplaced_box_ids, second.unplaced_box_ids);
        assert_eq!(first.placements.len(), second.placements.len());
        for (a, b) in first.placements.iter().zip(second.placements.iter()) {
            assert_eq!(a.box_id, b.box_id);
            assert_eq!(a.placement.x, b.placement.x);
            assert_eq!(a.placement.y, b.placement.y);
            assert_eq!(a.placement.z, b.placement.z);
        }
    }
}
