use crate::props::{Align, RectProps};
use crate::rect::{Cell, Placement};
use crate::units::Pt;

/// Size of an asset scaled to `percent` (0..=1) of the space it must fit in,
/// keeping the asset's aspect ratio. Tall assets are limited by the height of
/// the space, wide ones by its width.
fn fit(asset_width: f32, asset_height: f32, width: Pt, height: Pt, percent: f32) -> (Pt, Pt) {
    let asset_ratio = asset_height / asset_width;
    let space_ratio = height / width;

    let w = if asset_ratio > space_ratio {
        height / asset_ratio * percent
    } else {
        width * percent
    };
    (w, w * asset_ratio)
}

fn is_degenerate(asset_width: f32, asset_height: f32, width: Pt, height: Pt) -> bool {
    !(asset_width > 0.0 && asset_height > 0.0 && *width > 0.0 && *height > 0.0)
}

/// Computes where to draw an asset so that it is scaled to `percent` of the
/// cell and centered both horizontally and vertically.
///
/// The returned `x` is absolute (the cell's `x` is folded in) while `y` is
/// relative to the top of the cell; callers add `cell.y` before drawing.
/// Degenerate sizes yield an empty placement at the cell's left edge.
pub fn centered_placement(asset_width: f32, asset_height: f32, cell: &Cell, percent: f32) -> Placement {
    if is_degenerate(asset_width, asset_height, cell.width, cell.height) {
        return Placement {
            x: cell.x,
            ..Placement::default()
        };
    }

    let percent = RectProps::clamp_percent(percent) / 100.0;
    let (width, height) = fit(asset_width, asset_height, cell.width, cell.height, percent);

    Placement {
        x: cell.x + (cell.width - width) / 2.0,
        y: (cell.height - height) / 2.0,
        width,
        height,
    }
}

/// Computes where to draw an asset anchored at the top of the cell, offset by
/// the padding in `props` and aligned horizontally per `props.align`.
///
/// The asset is scaled to `props.percent` of the space left after padding, so
/// the result never extends beyond the cell. As with [centered_placement], `y`
/// is relative to the top of the cell.
pub fn anchored_placement(asset_width: f32, asset_height: f32, cell: &Cell, props: &RectProps) -> Placement {
    let available_width = (cell.width - props.left).max(Pt(0.0));
    let available_height = (cell.height - props.top).max(Pt(0.0));
    if is_degenerate(asset_width, asset_height, available_width, available_height) {
        return Placement {
            x: cell.x,
            ..Placement::default()
        };
    }

    let percent = RectProps::clamp_percent(props.percent) / 100.0;
    let (width, height) = fit(asset_width, asset_height, available_width, available_height, percent);

    let x = match props.align {
        Align::Left => cell.x + props.left,
        Align::Center => cell.x + (cell.width - width) / 2.0,
        Align::Right => cell.x + cell.width - props.left - width,
    };

    Placement {
        x,
        y: props.top,
        width,
        height,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const EPS: f32 = 1e-3;

    fn cell(w: f32, h: f32) -> Cell {
        Cell::new(Pt(40.0), Pt(300.0), Pt(w), Pt(h))
    }

    #[test]
    fn centered_placement_keeps_aspect_ratio_and_centers() {
        let sizes = [(10.0, 10.0), (400.0, 30.0), (30.0, 400.0), (1.0, 1000.0), (640.0, 480.0)];
        let cells = [cell(100.0, 50.0), cell(50.0, 100.0), cell(10.0, 10.0), cell(300.0, 7.5)];
        for &(aw, ah) in sizes.iter() {
            for c in cells.iter() {
                for percent in [100.0, 75.0, 10.0] {
                    let p = centered_placement(aw, ah, c, percent);
                    assert!(((*p.height / *p.width) - ah / aw).abs() < EPS * (ah / aw).max(1.0));

                    // contained
                    assert!(p.x >= c.x - Pt(EPS));
                    assert!(p.x + p.width <= c.x + c.width + Pt(EPS));
                    assert!(p.y >= Pt(-EPS));
                    assert!(p.y + p.height <= c.height + Pt(EPS));

                    // centered
                    let left = *(p.x - c.x);
                    let right = *(c.x + c.width - p.x - p.width);
                    assert!((left - right).abs() < EPS);
                    let top = *p.y;
                    let bottom = *(c.height - p.y - p.height);
                    assert!((top - bottom).abs() < EPS);
                }
            }
        }
    }

    #[test]
    fn centered_placement_fills_the_limiting_side() {
        let p = centered_placement(200.0, 100.0, &cell(100.0, 100.0), 100.0);
        assert_eq!(p.width, Pt(100.0));
        assert_eq!(p.height, Pt(50.0));
        assert_eq!(p.x, Pt(40.0));
        assert_eq!(p.y, Pt(25.0));
    }

    #[test]
    fn degenerate_inputs_produce_empty_placements() {
        let p = centered_placement(0.0, 10.0, &cell(100.0, 100.0), 100.0);
        assert_eq!(p.width, Pt(0.0));
        assert_eq!(p.height, Pt(0.0));
        let p = centered_placement(10.0, 10.0, &cell(0.0, 100.0), 100.0);
        assert_eq!(p.x, Pt(40.0));
        assert_eq!(p.width, Pt(0.0));
    }

    #[test]
    fn anchored_placement_stays_inside_the_cell() {
        let props = RectProps {
            left: Pt(20.0),
            top: Pt(10.0),
            ..RectProps::default()
        };
        let c = cell(100.0, 60.0);
        let p = anchored_placement(100.0, 100.0, &c, &props);
        assert_eq!(p.x, Pt(60.0));
        assert_eq!(p.y, Pt(10.0));
        assert_eq!(p.width, Pt(50.0));
        assert_eq!(p.height, Pt(50.0));
        assert!(p.x + p.width <= c.x + c.width);
        assert!(p.y + p.height <= c.height);
    }

    #[test]
    fn anchored_placement_aligns_right() {
        let props = RectProps {
            align: Align::Right,
            left: Pt(5.0),
            percent: 50.0,
            ..RectProps::default()
        };
        let p = anchored_placement(10.0, 10.0, &cell(105.0, 200.0), &props);
        assert_eq!(p.width, Pt(50.0));
        assert_eq!(p.x, Pt(40.0 + 105.0 - 5.0 - 50.0));
        assert_eq!(p.y, Pt(0.0));
    }

    #[test]
    fn anchored_placement_with_padding_larger_than_cell_is_empty() {
        let props = RectProps {
            left: Pt(200.0),
            ..RectProps::default()
        };
        let p = anchored_placement(10.0, 10.0, &cell(100.0, 100.0), &props);
        assert_eq!(p.width, Pt(0.0));
        assert_eq!(p.height, Pt(0.0));
    }
}
