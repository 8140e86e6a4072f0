use web_sys::{Element, MouseEvent, TouchEvent};

use torokko_core::{clamp_to_surface, Position};

/// Which listener family drives the session. Decided once at startup from
/// touch capability.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum InputMode {
    Mouse,
    Touch,
}

#[cfg(target_arch = "wasm32")]
pub(crate) fn detect_input_mode() -> InputMode {
    let has_touch = web_sys::window()
        .map(|window| {
            js_sys::Reflect::has(&window, &wasm_bindgen::JsValue::from_str("ontouchstart"))
                .unwrap_or(false)
        })
        .unwrap_or(false);
    if has_touch {
        InputMode::Touch
    } else {
        InputMode::Mouse
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn detect_input_mode() -> InputMode {
    InputMode::Mouse
}

/// One pointer reading in client coordinates, regardless of source device.
#[derive(Clone, Copy, Debug)]
pub(crate) struct PointerSample {
    pub client_x: f32,
    pub client_y: f32,
    /// Touch identifier; `None` for the mouse.
    pub id: Option<i32>,
}

pub(crate) fn mouse_sample(event: &MouseEvent) -> PointerSample {
    PointerSample {
        client_x: event.client_x() as f32,
        client_y: event.client_y() as f32,
        id: None,
    }
}

/// Reads the touch that belongs to this drag. With no active id the first
/// touch wins; ended touches are looked up in `changed_touches`.
pub(crate) fn touch_sample(
    event: &TouchEvent,
    active_id: Option<i32>,
    use_changed: bool,
) -> Option<PointerSample> {
    let list = if use_changed {
        event.changed_touches()
    } else {
        event.touches()
    };
    let touch = if let Some(id) = active_id {
        let mut found = None;
        for index in 0..list.length() {
            if let Some(touch) = list.item(index) {
                if touch.identifier() == id {
                    found = Some(touch);
                    break;
                }
            }
        }
        found?
    } else {
        list.item(0)?
    };
    Some(PointerSample {
        client_x: touch.client_x() as f32,
        client_y: touch.client_y() as f32,
        id: Some(touch.identifier()),
    })
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct ClientRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

pub(crate) trait HasClientRect {
    fn client_rect(&self) -> ClientRect;
}

impl HasClientRect for Element {
    fn client_rect(&self) -> ClientRect {
        let rect = self.get_bounding_client_rect();
        ClientRect {
            left: rect.left() as f32,
            top: rect.top() as f32,
            width: rect.width() as f32,
            height: rect.height() as f32,
        }
    }
}

/// Converts a client-coordinate sample to surface coordinates, clamped so
/// the item square stays inside the surface.
pub(crate) fn surface_point(
    sample: PointerSample,
    surface: &impl HasClientRect,
) -> Option<Position> {
    let rect = surface.client_rect();
    if rect.width <= 0.0 || rect.height <= 0.0 {
        return None;
    }
    let x = sample.client_x - rect.left;
    let y = sample.client_y - rect.top;
    Some(clamp_to_surface(x, y, rect.width, rect.height))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeRect(ClientRect);

    impl HasClientRect for FakeRect {
        fn client_rect(&self) -> ClientRect {
            self.0
        }
    }

    fn sample(x: f32, y: f32) -> PointerSample {
        PointerSample {
            client_x: x,
            client_y: y,
            id: None,
        }
    }

    #[test]
    fn surface_point_translates_to_local_coords() {
        let surface = FakeRect(ClientRect {
            left: 100.0,
            top: 50.0,
            width: 400.0,
            height: 300.0,
        });
        let point = surface_point(sample(180.0, 120.0), &surface).expect("point");
        assert_eq!(point, Position::new(80.0, 70.0));
    }

    #[test]
    fn surface_point_clamps_to_item_bounds() {
        let surface = FakeRect(ClientRect {
            left: 0.0,
            top: 0.0,
            width: 400.0,
            height: 300.0,
        });
        let point = surface_point(sample(1000.0, -40.0), &surface).expect("point");
        assert_eq!(point, Position::new(350.0, 0.0));
    }

    #[test]
    fn degenerate_surface_yields_none() {
        let surface = FakeRect(ClientRect {
            left: 0.0,
            top: 0.0,
            width: 0.0,
            height: 300.0,
        });
        assert!(surface_point(sample(10.0, 10.0), &surface).is_none());
    }
}
