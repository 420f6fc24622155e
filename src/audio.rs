use greeting_core::{BlowDetector, CaptureError, PlaybackError, SampleOutcome, SpectrumCapture};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

/// Id of the pending `requestAnimationFrame` for the sampling loop, if any.
pub type FrameSlot = Rc<Cell<Option<i32>>>;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

fn dom_error_parts(err: &JsValue) -> (String, String) {
    match err.dyn_ref::<web::DomException>() {
        Some(ex) => (ex.name(), ex.message()),
        None => ("Error".to_string(), format!("{:?}", err)),
    }
}

fn stop_tracks(stream: &web::MediaStream) {
    let tracks: js_sys::Array = stream.get_tracks();
    for track in tracks.iter() {
        if let Ok(track) = track.dyn_into::<web::MediaStreamTrack>() {
            track.stop();
        }
    }
}

fn close_context(ctx: &web::AudioContext) {
    if ctx.state() == web::AudioContextState::Closed {
        return;
    }
    if let Ok(promise) = ctx.close() {
        spawn_local(async move {
            if let Err(e) = JsFuture::from(promise).await {
                log::debug!("[blow] context close rejected: {:?}", e);
            }
        });
    }
}

/// Live microphone analysis: stream, context, analyser and the sampling
/// loop's frame handle. Released as one unit by the detector.
pub struct MicCapture {
    ctx: web::AudioContext,
    analyser: web::AnalyserNode,
    _source: web::MediaStreamAudioSourceNode,
    stream: web::MediaStream,
    frame: FrameSlot,
}

impl MicCapture {
    pub fn frame_slot(&self) -> FrameSlot {
        self.frame.clone()
    }
}

impl SpectrumCapture for MicCapture {
    fn bin_count(&self) -> usize {
        self.analyser.frequency_bin_count() as usize
    }

    fn read_frequency_data(&mut self, bins: &mut [u8]) {
        self.analyser.get_byte_frequency_data(bins);
    }

    fn release(&mut self) {
        if let Some(id) = self.frame.take() {
            if let Some(w) = web::window() {
                _ = w.cancel_animation_frame(id);
            }
        }
        stop_tracks(&self.stream);
        close_context(&self.ctx);
    }
}

fn build_analysis(
    stream: &web::MediaStream,
    fft_size: u32,
) -> Result<(web::AudioContext, web::AnalyserNode, web::MediaStreamAudioSourceNode), CaptureError>
{
    let ctx = web::AudioContext::new().map_err(|e| CaptureError::Analysis(format!("{:?}", e)))?;
    let wired = web::AnalyserNode::new(&ctx).and_then(|analyser| {
        analyser.set_fft_size(fft_size);
        let source = ctx.create_media_stream_source(stream)?;
        source.connect_with_audio_node(&analyser)?;
        Ok((analyser, source))
    });
    match wired {
        Ok((analyser, source)) => {
            // may still be suspended after the permission prompt
            _ = ctx.resume();
            Ok((ctx, analyser, source))
        }
        Err(e) => {
            close_context(&ctx);
            Err(CaptureError::Analysis(format!("{:?}", e)))
        }
    }
}

/// Ask for audio-only capture and wire it into an analyser.
pub async fn open_microphone(fft_size: u32) -> Result<MicCapture, CaptureError> {
    let window = web::window().ok_or_else(|| CaptureError::Unsupported("no window".into()))?;
    let devices = window
        .navigator()
        .media_devices()
        .map_err(|e| CaptureError::Unsupported(format!("{:?}", e)))?;
    let constraints = web::MediaStreamConstraints::new();
    constraints.set_audio(&JsValue::TRUE);
    constraints.set_video(&JsValue::FALSE);
    let to_capture_error = |e: JsValue| {
        let (name, message) = dom_error_parts(&e);
        CaptureError::from_dom_exception(&name, &message)
    };
    let promise = devices
        .get_user_media_with_constraints(&constraints)
        .map_err(to_capture_error)?;
    let stream = JsFuture::from(promise)
        .await
        .map_err(to_capture_error)?
        .dyn_into::<web::MediaStream>()
        .map_err(|_| CaptureError::Unsupported("getUserMedia did not return a stream".into()))?;

    match build_analysis(&stream, fft_size) {
        Ok((ctx, analyser, source)) => Ok(MicCapture {
            ctx,
            analyser,
            _source: source,
            stream,
            frame: Rc::new(Cell::new(None)),
        }),
        Err(e) => {
            stop_tracks(&stream);
            Err(e)
        }
    }
}

fn request_frame(tick: &FrameCallback, frame: &FrameSlot) {
    let Some(window) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        match window.request_animation_frame(cb.as_ref().unchecked_ref()) {
            Ok(id) => frame.set(Some(id)),
            Err(e) => log::error!("[blow] requestAnimationFrame failed: {:?}", e),
        }
    }
}

/// Sample the detector once per display frame until it stops listening.
///
/// The pending frame id lives in `frame`, which the capture cancels on
/// release, so an explicit stop never lets another sample run.
pub fn start_sampling_loop(detector: Rc<RefCell<BlowDetector<MicCapture>>>, frame: FrameSlot) {
    let tick: FrameCallback = Rc::new(RefCell::new(None));
    let tick_next = tick.clone();
    let frame_next = frame.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_next.set(None);
        let outcome = {
            let mut d = detector.borrow_mut();
            if d.is_listening() {
                d.sample()
            } else {
                SampleOutcome::Idle
            }
        };
        if matches!(outcome, SampleOutcome::Listening(_)) && detector.borrow().is_listening() {
            request_frame(&tick_next, &frame_next);
        } else {
            // drop the closure once this call has returned
            let slot = tick_next.clone();
            spawn_local(async move {
                drop(slot.borrow_mut().take());
            });
        }
    }) as Box<dyn FnMut()>));
    request_frame(&tick, &frame);
}

/// The looping background track.
pub struct MusicTrack {
    element: web::HtmlAudioElement,
}

impl MusicTrack {
    pub fn new(url: &str, volume: f64) -> anyhow::Result<Self> {
        let element =
            web::HtmlAudioElement::new_with_src(url).map_err(|e| anyhow::anyhow!("{:?}", e))?;
        element.set_loop(true);
        element.set_volume(volume);
        Ok(Self { element })
    }

    pub fn pause(&self) {
        _ = self.element.pause();
    }

    pub async fn play(&self) -> Result<(), PlaybackError> {
        let to_playback_error = |e: JsValue| {
            let (name, message) = dom_error_parts(&e);
            PlaybackError::from_dom_exception(&name, &message)
        };
        let promise = self.element.play().map_err(to_playback_error)?;
        JsFuture::from(promise)
            .await
            .map(|_| ())
            .map_err(to_playback_error)
    }
}
