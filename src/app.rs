use crate::audio::{self, MicCapture, MusicTrack};
use crate::constants::CONFETTI_CANVAS;
use crate::dom;
use crate::intent::Intent;
use crate::screens;
use glam::Vec2;
use greeting_core::constants::MIC_DENIED_NOTICE;
use greeting_core::{
    AudioTrackController, BlowDetector, ConfettiField, GreetingConfig, PhaseController, Signal,
    TrackAction,
};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

/// Monotonic time since page start, fed to the core as `now`.
#[derive(Clone, Copy)]
pub struct Clock {
    origin: Instant,
}

impl Clock {
    pub fn start() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    #[inline]
    pub fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Small presentation toggles that live outside the core.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UiToggles {
    pub hint: bool,
    pub secret: bool,
}

/// Shared handles for everything the event handlers and frame loop touch.
#[derive(Clone)]
pub struct App {
    pub document: web::Document,
    pub clock: Clock,
    pub config: Rc<GreetingConfig>,
    pub controller: Rc<RefCell<PhaseController>>,
    pub detector: Rc<RefCell<BlowDetector<MicCapture>>>,
    pub track: Rc<RefCell<AudioTrackController>>,
    pub music: Option<Rc<MusicTrack>>,
    pub confetti: Rc<RefCell<ConfettiField>>,
    pub confetti_canvas: web::HtmlCanvasElement,
    pub ui: Rc<RefCell<UiToggles>>,
}

impl App {
    pub fn new(document: web::Document, config: Rc<GreetingConfig>) -> anyhow::Result<Self> {
        let confetti_canvas = dom::canvas_by_id(&document, CONFETTI_CANVAS)?;
        let music = match MusicTrack::new(&config.music_url, config.music_volume) {
            Ok(m) => Some(Rc::new(m)),
            Err(e) => {
                log::warn!("[music] unavailable: {:?}", e);
                None
            }
        };
        Ok(Self {
            document,
            clock: Clock::start(),
            controller: Rc::new(RefCell::new(PhaseController::new(config.clone()))),
            detector: Rc::new(RefCell::new(BlowDetector::new(config.blow_threshold))),
            track: Rc::new(RefCell::new(AudioTrackController::new(config.music_volume))),
            music,
            confetti: Rc::new(RefCell::new(ConfettiField::new(rand::random()))),
            confetti_canvas,
            ui: Rc::new(RefCell::new(UiToggles::default())),
            config,
        })
    }

    pub fn handle(&self, intent: Intent) {
        let now = self.clock.now();
        let mut signals = Vec::new();
        match intent {
            Intent::Digit(key) => {
                self.controller
                    .borrow_mut()
                    .enter_digit(key, now, &mut signals);
            }
            Intent::DeleteDigit => {
                self.controller.borrow_mut().delete_digit();
            }
            Intent::Back => self.controller.borrow_mut().back(&mut signals),
            Intent::LightCandles => {
                let busy = {
                    let d = self.detector.borrow();
                    d.is_listening() || d.is_acquiring()
                };
                if !busy {
                    self.controller.borrow_mut().light_candles(&mut signals);
                }
            }
            Intent::ToggleMusic => {
                let action = self.track.borrow_mut().toggle();
                self.run_track_action(action);
            }
            Intent::ToggleHint => {
                let mut ui = self.ui.borrow_mut();
                ui.hint = !ui.hint;
            }
            Intent::ToggleSecret => {
                let mut ui = self.ui.borrow_mut();
                ui.secret = !ui.secret;
            }
        }
        self.dispatch(signals);
    }

    /// Carry out controller signals. Never called with a controller borrow held.
    pub fn dispatch(&self, signals: Vec<Signal>) {
        for signal in signals {
            match signal {
                Signal::PhaseChanged { to, .. } => {
                    *self.ui.borrow_mut() = UiToggles::default();
                    screens::show_phase(&self.document, to);
                }
                Signal::Burst(burst) => {
                    let viewport = Vec2::new(
                        self.confetti_canvas.width() as f32,
                        self.confetti_canvas.height() as f32,
                    );
                    self.confetti.borrow_mut().spawn(&burst, viewport);
                }
                Signal::StartListening => self.begin_listening(),
                Signal::StopListening => self.detector.borrow_mut().stop(),
                Signal::AutoplayMusic => {
                    let request = self.track.borrow_mut().autostart();
                    if let Some(request) = request {
                        self.run_track_action(TrackAction::Play(request));
                    }
                }
                Signal::PinRejected => log::debug!("[lock] rejected attempt"),
            }
        }
    }

    fn run_track_action(&self, action: TrackAction) {
        let Some(music) = self.music.clone() else {
            return;
        };
        match action {
            TrackAction::Pause => music.pause(),
            TrackAction::Play(request) => {
                let track = self.track.clone();
                spawn_local(async move {
                    let result = music.play().await;
                    track.borrow_mut().resolve(request, result);
                });
            }
        }
    }

    fn begin_listening(&self) {
        let ticket = self.detector.borrow_mut().begin_acquire();
        let app = self.clone();
        spawn_local(async move {
            match audio::open_microphone(app.config.fft_size).await {
                Ok(capture) => {
                    let frame = capture.frame_slot();
                    let controller = app.controller.clone();
                    let clock = app.clock;
                    let attached = app.detector.borrow_mut().attach(ticket, capture, move || {
                        controller.borrow_mut().candles_blown(clock.now());
                    });
                    if attached {
                        audio::start_sampling_loop(app.detector.clone(), frame);
                    }
                }
                Err(err) => {
                    let current = app.detector.borrow_mut().fail(ticket, err);
                    if current.is_some() {
                        app.controller.borrow_mut().capture_failed();
                        dom::alert(MIC_DENIED_NOTICE);
                    }
                }
            }
        });
    }

    /// Page is going away: release the microphone and silence the music.
    pub fn teardown(&self) {
        self.detector.borrow_mut().stop();
        if let Some(music) = &self.music {
            music.pause();
        }
        self.track.borrow_mut().paused_externally();
    }
}
