//! Neon Rain entry point
//!
//! Handles platform-specific initialization and runs the rain loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_rain {
    use std::cell::RefCell;
    use std::rc::Rc;
    use thiserror::Error;
    use wasm_bindgen::prelude::*;
    use web_sys::HtmlCanvasElement;

    use neon_rain::Settings;
    use neon_rain::host::{FrameClock, WindowMode};
    use neon_rain::renderer::{RainRenderState, RenderError};
    use neon_rain::sim::{
        ConfigError, DrawList, RainState, Viewport, advance_and_render, render_only,
    };

    /// Screensaver instance holding all state
    struct Rain {
        state: RainState,
        render_state: RainRenderState,
        clock: FrameClock,
        draw_list: DrawList,
        canvas: HtmlCanvasElement,
        mode: WindowMode,
        show_stats: bool,
        frames: u64,
    }

    impl Rain {
        /// Canvas size in device pixels for the current mode
        fn poll_viewport(&self) -> Viewport {
            match self.mode {
                WindowMode::Root => {
                    let dpr = web_sys::window().map_or(1.0, |w| w.device_pixel_ratio());
                    let w = (self.canvas.client_width() as f64 * dpr) as i32;
                    let h = (self.canvas.client_height() as f64 * dpr) as i32;
                    Viewport::from_signed(w, h)
                }
                WindowMode::Windowed { .. } => self.mode.viewport(None),
            }
        }

        /// Run due ticks and present the newest frame
        fn frame(&mut self, time: f64) {
            let viewport = self.poll_viewport();
            let resized =
                (viewport.width, viewport.height) != self.render_state.size && !viewport.is_empty();
            if resized {
                self.canvas.set_width(viewport.width);
                self.canvas.set_height(viewport.height);
                self.render_state.resize(viewport.width, viewport.height);
                log::debug!("Resized to {}x{}", viewport.width, viewport.height);
            }

            let ticks = self.clock.advance(time);
            if ticks == 0 {
                if !resized {
                    return;
                }
                // Resizing clears the canvas; repaint the rings where they are
                self.draw_list.clear();
                render_only(&self.state, &mut self.draw_list);
            }
            for _ in 0..ticks {
                self.draw_list.clear();
                advance_and_render(&mut self.state, viewport, &mut self.draw_list);
            }

            match self.render_state.render(&self.draw_list) {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost) => {
                    let (w, h) = self.render_state.size;
                    self.render_state.resize(w, h);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }

            self.frames += 1;
            if self.show_stats && self.frames % 20 == 0 {
                log::info!(
                    "tick {} rings {} circles {}",
                    self.state.time_ticks,
                    self.state.live_count(),
                    self.draw_list.circle_count()
                );
            }
        }
    }

    /// Reasons the screensaver cannot start
    #[derive(Debug, Error)]
    enum StartError {
        #[error(transparent)]
        Render(#[from] RenderError),

        #[error("invalid rain configuration: {0}")]
        Rain(#[from] ConfigError),
    }

    /// `?w=800&h=600` selects a fixed-size canvas; anything else fills the page
    fn window_mode_from_query(window: &web_sys::Window) -> WindowMode {
        let search = window.location().search().unwrap_or_default();
        let mut width = None;
        let mut height = None;
        for pair in search.trim_start_matches('?').split('&') {
            match pair.split_once('=') {
                Some(("w", v)) => width = v.parse().ok(),
                Some(("h", v)) => height = v.parse().ok(),
                _ => {}
            }
        }
        match (width, height) {
            (Some(width), Some(height)) => WindowMode::Windowed { width, height },
            _ => WindowMode::Root,
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Neon Rain starting...");
        if let Err(e) = start().await {
            log::error!("Neon Rain failed to start: {}", e);
        }
    }

    async fn start() -> Result<(), StartError> {
        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let settings = Settings::load();
        let mode = window_mode_from_query(&window);

        let dpr = window.device_pixel_ratio();
        let screen = (
            (canvas.client_width() as f64 * dpr) as u32,
            (canvas.client_height() as f64 * dpr) as u32,
        );
        let viewport = mode.viewport(Some(screen));
        canvas.set_width(viewport.width);
        canvas.set_height(viewport.height);

        let seed = js_sys::Date::now() as u64;
        let state = RainState::new(seed, settings.rain.clone())?;
        log::info!(
            "Rain initialized with seed {} ({} mode, {}x{}, preset {})",
            seed,
            mode.as_str(),
            viewport.width,
            viewport.height,
            settings.preset.as_str()
        );

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(RenderError::from)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(RenderError::from)?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RainRenderState::new(
            surface,
            &adapter,
            viewport.width,
            viewport.height,
            settings.circle_segments,
        )
        .await?;

        let rain = Rc::new(RefCell::new(Rain {
            state,
            render_state,
            clock: FrameClock::new(settings.frame_interval_ms),
            // The GPU consumes unit-range colors
            draw_list: DrawList::new(neon_rain::ChannelRange::Unit),
            canvas,
            mode,
            show_stats: settings.show_stats,
            frames: 0,
        }));

        request_animation_frame(rain);

        log::info!("Neon Rain running!");
        Ok(())
    }

    fn request_animation_frame(rain: Rc<RefCell<Rain>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            rain_loop(rain, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn rain_loop(rain: Rc<RefCell<Rain>>, time: f64) {
        rain.borrow_mut().frame(time);
        request_animation_frame(rain);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_rain::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;
    use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

    use clap::Parser;
    use thiserror::Error;

    use neon_rain::host::WindowMode;
    use neon_rain::renderer::FrameStats;
    use neon_rain::sim::{ConfigError, DrawList, RainPreset, RainState, advance_and_render};
    use neon_rain::{Settings, SettingsError};

    /// Neon rain: expanding rings of color (headless native host)
    #[derive(Parser, Debug)]
    #[command(name = "neon-rain", version)]
    struct Args {
        /// Cover the whole screen (screensaver mode)
        #[arg(long, conflicts_with = "dimensions")]
        root: bool,

        /// Window size in pixels
        #[arg(short = 'd', long, num_args = 2, value_names = ["WIDTH", "HEIGHT"])]
        dimensions: Option<Vec<u32>>,

        /// RNG seed (defaults to the current time)
        #[arg(long)]
        seed: Option<u64>,

        /// Look preset: neon or classic
        #[arg(long, value_parser = parse_preset)]
        preset: Option<RainPreset>,

        /// Settings JSON file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Stop after this many frames (0 runs until interrupted)
        #[arg(long, default_value_t = 0)]
        frames: u64,

        /// ms between frames (overrides settings)
        #[arg(long)]
        interval_ms: Option<u64>,

        /// Log frame statistics every second
        #[arg(long)]
        stats: bool,

        /// Print the effective settings as JSON and exit
        #[arg(long)]
        print_config: bool,
    }

    fn parse_preset(s: &str) -> Result<RainPreset, String> {
        RainPreset::from_str(s).ok_or_else(|| format!("unknown preset '{s}' (neon, classic)"))
    }

    /// Fatal startup errors
    #[derive(Debug, Error)]
    pub enum HostError {
        #[error(transparent)]
        Settings(#[from] SettingsError),

        #[error("invalid rain configuration: {0}")]
        Rain(#[from] ConfigError),

        #[error("window dimensions must be positive (got {0}x{1})")]
        EmptyWindow(u32, u32),
    }

    impl Args {
        fn window_mode(&self) -> Result<WindowMode, HostError> {
            if self.root {
                return Ok(WindowMode::Root);
            }
            match self.dimensions.as_deref() {
                Some(&[width, height]) if width > 0 && height > 0 => {
                    Ok(WindowMode::Windowed { width, height })
                }
                Some(&[width, height]) => Err(HostError::EmptyWindow(width, height)),
                _ => Ok(WindowMode::default()),
            }
        }

        fn settings(&self) -> Result<Settings, HostError> {
            let mut settings = match &self.config {
                Some(path) => Settings::load_file(path)?,
                None => Settings::default(),
            };
            if let Some(preset) = self.preset {
                settings.apply_preset(preset);
            }
            if let Some(ms) = self.interval_ms {
                settings.frame_interval_ms = ms;
            }
            settings.show_stats |= self.stats;
            settings.validate()?;
            Ok(settings)
        }
    }

    fn clock_seed() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default()
    }

    pub fn run() -> Result<(), HostError> {
        let args = Args::parse();
        let settings = args.settings()?;
        if args.print_config {
            println!("{}", settings.to_json()?);
            return Ok(());
        }
        let mode = args.window_mode()?;
        let viewport = mode.viewport(None);
        let seed = args.seed.unwrap_or_else(clock_seed);

        let mut state = RainState::new(seed, settings.rain.clone())?;
        let mut draw_list = DrawList::new(settings.color_range);
        let mut stats = FrameStats::default();

        log::info!(
            "Neon Rain (native) seed {} ({} mode, {}x{}, preset {}, capacity {}, {} colors)",
            seed,
            mode.as_str(),
            viewport.width,
            viewport.height,
            settings.preset.as_str(),
            settings.rain.capacity,
            settings.color_range.as_str()
        );
        log::info!("Native mode is headless - run with `trunk serve` for the web version");

        let interval = Duration::from_millis(settings.frame_interval_ms);
        let frames_per_report = (1000 / settings.frame_interval_ms.max(1)).max(1);

        loop {
            let started = Instant::now();

            draw_list.clear();
            let live = advance_and_render(&mut state, viewport, &mut draw_list);
            stats.present(&draw_list);

            if stats.frames % frames_per_report == 0 {
                let line = format!(
                    "frame {} rings {} (drawn {}) circles {} (mean {:.1})",
                    stats.frames,
                    live,
                    stats.last_rings,
                    stats.last_circles,
                    stats.mean_circles()
                );
                if settings.show_stats {
                    log::info!("{line}");
                } else {
                    log::debug!("{line}");
                }
            }

            if args.frames != 0 && stats.frames >= args.frames {
                break;
            }

            if let Some(rest) = interval.checked_sub(started.elapsed()) {
                std::thread::sleep(rest);
            }
        }

        log::info!(
            "Stopped after {} frames, {} rings and {} circles drawn",
            stats.frames,
            stats.color_calls,
            stats.circle_calls
        );
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    env_logger::init();

    match native::run() {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("neon-rain: {e}");
            std::process::ExitCode::FAILURE
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
