use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Function, Reflect};
use smart_ambulance_core::geolocation::{from_position_error_code, GeolocationFix};
use smart_ambulance_core::GeolocationError;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};

type Outcome = Result<GeolocationFix, GeolocationError>;

/// Ask `navigator.geolocation` for one position. `on_outcome` runs exactly
/// once, with the fix or the reason there is none.
pub fn request_position<F>(on_outcome: F)
where
    F: FnOnce(Outcome) + 'static,
{
    let Some(geolocation) = web_sys::window().and_then(|window| window.navigator().geolocation().ok())
    else {
        on_outcome(Err(GeolocationError::Unsupported));
        return;
    };

    let pending = Rc::new(RefCell::new(Some(on_outcome)));

    // Only the callback the browser invokes is freed; the other one stays
    // allocated. That is one closure per page load, as this runs once.

    let success = Closure::once_into_js({
        let pending = Rc::clone(&pending);
        move |position: JsValue| finish(&pending, read_fix(&position))
    });
    let failure = Closure::once_into_js({
        let pending = Rc::clone(&pending);
        move |error: JsValue| finish(&pending, Err(read_error(&error)))
    });

    if let Err(error) = geolocation.get_current_position_with_error_callback(
        success.unchecked_ref::<Function>(),
        Some(failure.unchecked_ref::<Function>()),
    ) {
        web_sys::console::warn_2(&"Geolocation request failed".into(), &error);
        finish(&pending, Err(GeolocationError::Unsupported));
    }
}

fn finish<F>(pending: &RefCell<Option<F>>, outcome: Outcome)
where
    F: FnOnce(Outcome),
{
    let callback = pending.borrow_mut().take();
    if let Some(callback) = callback {
        callback(outcome);
    }
}

fn read_fix(position: &JsValue) -> Outcome {
    let coords = Reflect::get(position, &"coords".into())
        .map_err(|_| GeolocationError::PositionUnavailable)?;
    let number = |key: &str| {
        Reflect::get(&coords, &key.into())
            .ok()
            .and_then(|value| value.as_f64())
            .ok_or(GeolocationError::PositionUnavailable)
    };

    Ok(GeolocationFix {
        latitude: number("latitude")?,
        longitude: number("longitude")?,
    })
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn read_error(error: &JsValue) -> GeolocationError {
    Reflect::get(error, &"code".into())
        .ok()
        .and_then(|code| code.as_f64())
        .map_or(GeolocationError::PositionUnavailable, |code| {
            from_position_error_code(code as u16)
        })
}
