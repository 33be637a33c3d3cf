#![deny(unsafe_code)]
//! WASM bindings for the tricube demo renderer.
//!
//! [`start`] is the explicit entry point a host page calls after load:
//! it looks up the canvas, acquires a WebGL2 context, resolves the named
//! scene, builds the pipeline, and kicks off a self-re-registering
//! `requestAnimationFrame` loop. Missing host capabilities (canvas,
//! context) abort initialization with a `JsValue` error; there is no
//! retry path.
//!
//! Textured scenes start on a 1x1 placeholder; the real image is fetched
//! by URL and swapped in by the `onload` handler whenever it arrives, so
//! the first frames render gray.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use tricube_core::render::ScenePipeline;
use tricube_scenes::SceneKind;

/// Viewport aspect ratio, guarding against a zero-height canvas.
fn aspect_ratio(width: u32, height: u32) -> f32 {
    if height == 0 {
        1.0
    } else {
        width as f32 / height as f32
    }
}

fn js_err(message: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&message.to_string())
}

/// Initializes the renderer on the canvas with the given element id and
/// starts the frame loop.
///
/// `scene` is a registry name (see `tricube-scenes`); `params_json` is a
/// JSON object of overrides (empty string for defaults); `texture_url`
/// supplies the image for textured scenes.
///
/// # Errors
///
/// Fails if the canvas is missing, WebGL2 is unavailable, the scene name
/// is unknown, a parameter is malformed, or the shaders do not build.
/// Every failure is terminal; the loop never starts.
#[wasm_bindgen]
pub fn start(
    canvas_id: &str,
    scene: &str,
    params_json: &str,
    texture_url: Option<String>,
) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| js_err("no window object"))?;
    let document = window.document().ok_or_else(|| js_err("no document object"))?;

    let canvas = document
        .get_element_by_id(canvas_id)
        .ok_or_else(|| js_err(format!("canvas '{canvas_id}' not found")))?
        .dyn_into::<web_sys::HtmlCanvasElement>()
        .map_err(|_| js_err(format!("element '{canvas_id}' is not a canvas")))?;

    let webgl2 = canvas
        .get_context("webgl2")?
        .ok_or_else(|| js_err("failed to initialize WebGL2"))?
        .dyn_into::<web_sys::WebGl2RenderingContext>()
        .map_err(|_| js_err("context is not WebGL2"))?;
    let gl = Rc::new(glow::Context::from_webgl2_context(webgl2));

    let params: serde_json::Value = if params_json.trim().is_empty() {
        serde_json::Value::Object(Default::default())
    } else {
        serde_json::from_str(params_json)
            .map_err(|err| js_err(format!("params is not JSON: {err}")))?
    };

    let config = SceneKind::from_name(scene)
        .and_then(|kind| kind.config(aspect_ratio(canvas.width(), canvas.height()), &params))
        .map_err(js_err)?;
    let pipeline = Rc::new(ScenePipeline::build(&gl, &config).map_err(js_err)?);

    if config.needs_texture() {
        if let Some(url) = texture_url {
            load_texture(Rc::clone(&gl), Rc::clone(&pipeline), &url)?;
        }
    }

    run_frame_loop(&window, gl, pipeline)
}

/// Registers the per-frame callback. The closure re-registers itself on
/// every invocation, so the loop runs until the host stops scheduling it.
fn run_frame_loop(
    window: &web_sys::Window,
    gl: Rc<glow::Context>,
    pipeline: Rc<ScenePipeline>,
) -> Result<(), JsValue> {
    let callback: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let handle = Rc::clone(&callback);

    *callback.borrow_mut() = Some(Closure::new(move |timestamp_ms: f64| {
        pipeline.frame(&gl, timestamp_ms);
        pipeline.capture_pass(&gl, timestamp_ms);

        if let (Some(window), Some(closure)) = (web_sys::window(), handle.borrow().as_ref()) {
            if let Err(err) = window.request_animation_frame(closure.as_ref().unchecked_ref()) {
                web_sys::console::warn_1(&err);
            }
        }
    }));

    let borrowed = callback.borrow();
    let closure = borrowed
        .as_ref()
        .ok_or_else(|| js_err("frame callback missing"))?;
    window.request_animation_frame(closure.as_ref().unchecked_ref())?;
    Ok(())
}

/// Starts the asynchronous image fetch for a textured scene. The onload
/// handler replaces the placeholder texture whenever the image arrives.
fn load_texture(
    gl: Rc<glow::Context>,
    pipeline: Rc<ScenePipeline>,
    url: &str,
) -> Result<(), JsValue> {
    let image = web_sys::HtmlImageElement::new()?;
    image.set_cross_origin(Some("anonymous"));

    let loaded = image.clone();
    let onload = Closure::<dyn FnMut()>::new(move || {
        if let Err(err) = replace_texture(&gl, &pipeline, &loaded) {
            web_sys::console::warn_1(&err);
        }
    });
    image.set_onload(Some(onload.as_ref().unchecked_ref()));
    // One-shot handler; intentionally leaked so it survives until onload.
    onload.forget();

    image.set_src(url);
    Ok(())
}

/// Extracts RGBA pixels from a decoded image via a scratch 2D canvas and
/// uploads them over the placeholder.
fn replace_texture(
    gl: &glow::Context,
    pipeline: &ScenePipeline,
    image: &web_sys::HtmlImageElement,
) -> Result<(), JsValue> {
    let width = image.natural_width();
    let height = image.natural_height();
    if width == 0 || height == 0 {
        return Err(js_err("texture image decoded to zero size"));
    }

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| js_err("no document for texture decode"))?;
    let scratch = document
        .create_element("canvas")?
        .dyn_into::<web_sys::HtmlCanvasElement>()
        .map_err(|_| js_err("failed to create scratch canvas"))?;
    scratch.set_width(width);
    scratch.set_height(height);

    let ctx = scratch
        .get_context("2d")?
        .ok_or_else(|| js_err("no 2d context for texture decode"))?
        .dyn_into::<web_sys::CanvasRenderingContext2d>()
        .map_err(|_| js_err("context is not 2d"))?;
    ctx.draw_image_with_html_image_element(image, 0.0, 0.0)?;

    let data = ctx.get_image_data(0.0, 0.0, f64::from(width), f64::from(height))?;
    let pixels = data.data().0;

    pipeline
        .set_texture_rgba(gl, width, height, &pixels)
        .map_err(js_err)
}
