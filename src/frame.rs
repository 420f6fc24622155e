use crate::app::App;
use crate::dom;
use crate::render::{self, CakeFrame};
use crate::screens::{self, ViewState};
use greeting_core::{default_candle_layout, CandleSpot, Flame, Phase, SceneInputs};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Per-frame state owned by the animation loop.
pub struct FrameContext {
    pub app: App,
    pub cake_canvas: web::HtmlCanvasElement,
    pub cake_ctx: web::CanvasRenderingContext2d,
    pub confetti_ctx: web::CanvasRenderingContext2d,
    pub candles: Vec<CandleSpot>,
    pub flames: Vec<Flame>,
    pub last_instant: Instant,
    pub scene_time: f32,
    pub blown_at: Option<f32>,
    pub view: Option<ViewState>,
}

impl FrameContext {
    pub fn new(app: App, cake_canvas: web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let cake_ctx = dom::context_2d(&cake_canvas)?;
        let confetti_ctx = dom::context_2d(&app.confetti_canvas)?;
        let candles = default_candle_layout();
        let flames = (0..candles.len()).map(|i| Flame::new(i as f32 * 0.7)).collect();
        Ok(Self {
            app,
            cake_canvas,
            cake_ctx,
            confetti_ctx,
            candles,
            flames,
            last_instant: Instant::now(),
            scene_time: 0.0,
            blown_at: None,
            view: None,
        })
    }

    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt = (now - self.last_instant).as_secs_f32().min(0.1);
        self.last_instant = now;
        self.scene_time += dt;

        let mut signals = Vec::new();
        self.app
            .controller
            .borrow_mut()
            .tick(self.app.clock.now(), &mut signals);
        self.app.dispatch(signals);

        {
            let mut confetti = self.app.confetti.borrow_mut();
            if !confetti.is_empty() {
                confetti.step();
                render::draw_confetti(&self.confetti_ctx, &self.app.confetti_canvas, &confetti);
                if confetti.is_empty() {
                    render::clear(&self.confetti_ctx, &self.app.confetti_canvas);
                }
            }
        }

        let view = ViewState::capture(&self.app);
        if view.phase == Phase::Candle {
            if self.view.as_ref().map(|v| v.phase) != Some(Phase::Candle) {
                // the screen was hidden until now, so its layout size is fresh
                dom::sync_canvas_backing_size(&self.cake_canvas);
            }
            self.draw_cake(&view, dt);
        }

        if self.view.as_ref() != Some(&view) {
            screens::apply(&self.app.document, self.view.as_ref(), &view);
            self.view = Some(view);
        }
    }

    fn draw_cake(&mut self, view: &ViewState, dt: f32) {
        let inputs = SceneInputs {
            is_blown: view.candles.is_blown(),
            is_lit: view.candles.is_lit(),
            wind_volume: self.app.detector.borrow().wind_volume(),
        };
        match (inputs.is_blown, self.blown_at) {
            (true, None) => self.blown_at = Some(self.scene_time),
            (false, Some(_)) => self.blown_at = None,
            _ => {}
        }
        for flame in &mut self.flames {
            flame.update(self.scene_time, dt, inputs);
        }
        render::draw_cake(
            &self.cake_ctx,
            &self.cake_canvas,
            &self.candles,
            &self.flames,
            CakeFrame {
                scene_time: self.scene_time,
                blown_at: self.blown_at,
            },
        );
    }
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

fn request_frame(tick: &FrameCallback) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        if let Err(e) = w.request_animation_frame(cb.as_ref().unchecked_ref()) {
            log::error!("[frame] requestAnimationFrame failed: {:?}", e);
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: FrameCallback = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}
