//! Desktop simulator for the compass UI.
//!
//! Renders the compass page in an SDL2 window via `embedded-graphics-simulator`.
//! Orientation, location and geocoding are simulated so the whole pipeline
//! (sensor listener → heading tracker → state cells → page) runs without
//! hardware.
//!
//! # Key bindings
//!
//! | Key     | Action                                   |
//! |---------|------------------------------------------|
//! | ← / →   | Nudge the heading by 15°                 |
//! | L       | Grant / revoke location permission       |
//! | G       | Make the geocoder fail / succeed         |
//! | Q / Esc | Quit                                     |
//!
//! Set `COMPASS_CONFIG` to the path of a postcard-encoded configuration to
//! override the defaults.

use std::time::{Duration, Instant};

use embassy_futures::block_on;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::{
    OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window, sdl2::Keycode,
};
use log::{debug, error, info, warn};

use compass_core::app_state::AppError;
use compass_core::config::CompassConfig;
use compass_core::detent::DetentTracker;
use compass_core::geocode::{GeocodeError, Geocoder, Place};
use compass_core::pages::{CompassPage, Page, StateEvents};
use compass_core::sensors::{
    ActiveSensor, HeadingListener, LocationFix, LocationListener, LocationRequest,
    LocationSource, OrientationSource, RotationVector, SensorError, Stoppable,
};
use compass_core::ui::{DISPLAY_HEIGHT_PX, DISPLAY_WIDTH_PX, PageEvent, screen_bounds};
use compass_core::{Compass, Permission};

// ---------------------------------------------------------------------------
// Simulation constants
// ---------------------------------------------------------------------------

/// Pixel scale factor for the simulator window.
const WINDOW_SCALE: u32 = 2;

/// Environment variable naming an optional configuration file.
const CONFIG_ENV_VAR: &str = "COMPASS_CONFIG";

/// Heading the simulated device starts at.
const INITIAL_HEADING_DEG: f32 = 350.0;

/// Slow clockwise drift so the dial keeps crossing north.
const SWEEP_DEG_PER_SEC: f32 = 6.0;

/// Hand tremor superimposed on the drift.
const WOBBLE_AMPLITUDE_DEG: f32 = 2.0;

/// Heading change per arrow key press.
const NUDGE_DEG: f32 = 15.0;

/// Where the simulated location wanders around (San Francisco).
const HOME_LATITUDE: f64 = 37.7749;
const HOME_LONGITUDE: f64 = -122.4194;
const HOME_ALTITUDE_M: f64 = 16.0;

// ---------------------------------------------------------------------------
// Simulated capabilities
// ---------------------------------------------------------------------------

/// Rotation-vector sensor that drifts, wobbles and obeys arrow keys.
struct SimulatedOrientation<'a> {
    listener: Option<&'a dyn HeadingListener>,
    heading: f32,
    elapsed_secs: f32,
}

impl SimulatedOrientation<'_> {
    fn new(heading: f32) -> Self {
        Self {
            listener: None,
            heading,
            elapsed_secs: 0.0,
        }
    }

    fn nudge(&mut self, degrees: f32) {
        self.heading += degrees;
        debug!("Nudged heading by {}°", degrees);
    }

    /// Advance the simulation and deliver one sample.
    fn tick(&mut self, dt: Duration) {
        let Some(listener) = self.listener else {
            return;
        };

        let dt_secs = dt.as_secs_f32();
        self.elapsed_secs += dt_secs;
        self.heading += SWEEP_DEG_PER_SEC * dt_secs;

        let wobble = WOBBLE_AMPLITUDE_DEG * (self.elapsed_secs * 1.7).sin();
        // Counter-clockwise rotation about the vertical reads as a clockwise heading.
        let sample = RotationVector::about_vertical(-(self.heading + wobble));
        listener.on_rotation_vector(&sample);
    }
}

impl Stoppable for SimulatedOrientation<'_> {
    fn stop(&mut self) {
        self.listener = None;
    }
}

impl<'a> OrientationSource<'a> for SimulatedOrientation<'a> {
    fn start(&mut self, listener: &'a dyn HeadingListener) -> Result<(), SensorError> {
        self.listener = Some(listener);
        Ok(())
    }
}

/// Location provider that reports a fix per requested interval.
///
/// The first fix after starting carries no altitude, like a cold GPS.
struct SimulatedLocation<'a> {
    listener: Option<&'a dyn LocationListener>,
    interval: Duration,
    since_last_fix: Duration,
    fixes_sent: u32,
}

impl SimulatedLocation<'_> {
    fn new() -> Self {
        Self {
            listener: None,
            interval: Duration::ZERO,
            since_last_fix: Duration::ZERO,
            fixes_sent: 0,
        }
    }

    fn tick(&mut self, dt: Duration) {
        let Some(listener) = self.listener else {
            return;
        };

        self.since_last_fix += dt;
        if self.since_last_fix < self.interval {
            return;
        }
        self.since_last_fix = Duration::ZERO;

        let n = self.fixes_sent as f64;
        let altitude = (self.fixes_sent > 0).then(|| HOME_ALTITUDE_M + (n * 0.9).sin() * 2.0);
        let fix = LocationFix::new(
            HOME_LATITUDE + 0.0004 * (n * 0.3).sin(),
            HOME_LONGITUDE + 0.0004 * (n * 0.2).cos(),
            altitude,
        );

        debug!("Simulated fix #{}: {:?}", self.fixes_sent, fix);
        self.fixes_sent += 1;
        listener.on_location(fix);
    }
}

impl Stoppable for SimulatedLocation<'_> {
    fn stop(&mut self) {
        self.listener = None;
    }
}

impl<'a> LocationSource<'a> for SimulatedLocation<'a> {
    fn start(
        &mut self,
        request: LocationRequest,
        listener: &'a dyn LocationListener,
    ) -> Result<(), SensorError> {
        self.interval = Duration::from_millis(request.interval_ms as u64);
        // Deliver the first fix on the next tick.
        self.since_last_fix = self.interval;
        self.fixes_sent = 0;
        self.listener = Some(listener);
        Ok(())
    }
}

/// Geocoder with a switchable failure mode.
#[derive(Default)]
struct SimulatedGeocoder {
    failing: bool,
}

impl Geocoder for SimulatedGeocoder {
    async fn reverse_geocode(
        &mut self,
        _latitude: f64,
        _longitude: f64,
    ) -> Result<Option<Place>, GeocodeError> {
        if self.failing {
            return Err(GeocodeError::Unavailable);
        }
        Ok(Some(Place::new(Some("San Francisco"), Some("California"))))
    }
}

// ---------------------------------------------------------------------------
// Render loop
// ---------------------------------------------------------------------------

/// Why the frame loop returned.
enum Exit {
    Quit,
    TogglePermission,
}

/// Everything that outlives a single location session.
struct Ui<'a> {
    display: SimulatorDisplay<Rgb565>,
    window: Window,
    page: CompassPage,
    events: StateEvents<'a>,
    detent: DetentTracker,
    geocoder: SimulatedGeocoder,
    frame_duration: Duration,
}

impl<'a> Ui<'a> {
    fn new(compass: &'a Compass) -> Option<Self> {
        let config = compass.config();
        let display = SimulatorDisplay::<Rgb565>::new(Size::new(
            DISPLAY_WIDTH_PX as u32,
            DISPLAY_HEIGHT_PX as u32,
        ));
        let output_settings = OutputSettingsBuilder::new().scale(WINDOW_SCALE).build();

        Some(Self {
            display,
            window: Window::new("Compass Simulator", &output_settings),
            page: CompassPage::new(
                screen_bounds(),
                embassy_time::Duration::from_millis(config.animation_ms as u64),
            ),
            events: StateEvents::subscribe(compass.state())?,
            detent: DetentTracker::new(config.detent_degrees as f32, INITIAL_HEADING_DEG),
            geocoder: SimulatedGeocoder::default(),
            frame_duration: Duration::from_millis(config.frame_ms as u64),
        })
    }

    fn render(&mut self) {
        if !self.page.is_dirty() {
            return;
        }
        if let Err(e) = self.page.draw_page(&mut self.display) {
            error!("Draw error: {:?}", e);
        }
        self.page.mark_clean();
    }
}

/// Run frames until the user quits or toggles permission.
///
/// `location` is owned here so the location source stops when this returns.
fn run_frames<'a>(
    compass: &'a Compass,
    ui: &mut Ui<'a>,
    orientation: &mut ActiveSensor<'_, SimulatedOrientation<'a>>,
    mut location: Option<ActiveSensor<'_, SimulatedLocation<'a>>>,
) -> Exit {
    let mut last_frame = Instant::now();

    loop {
        let frame_start = Instant::now();
        let dt = frame_start - last_frame;
        last_frame = frame_start;

        // --- SDL events ---------------------------------------------------
        for event in ui.window.events() {
            match event {
                SimulatorEvent::Quit => return Exit::Quit,
                SimulatorEvent::KeyDown { keycode, .. } => match keycode {
                    Keycode::Q | Keycode::Escape => return Exit::Quit,
                    Keycode::L => return Exit::TogglePermission,
                    Keycode::G => {
                        ui.geocoder.failing = !ui.geocoder.failing;
                        info!("Geocoder failing: {}", ui.geocoder.failing);
                    }
                    Keycode::Left => orientation.nudge(-NUDGE_DEG),
                    Keycode::Right => orientation.nudge(NUDGE_DEG),
                    _ => {}
                },
                _ => {}
            }
        }

        // --- Simulated sensors --------------------------------------------
        orientation.tick(dt);
        if let Some(location) = location.as_mut() {
            location.tick(dt);
        }

        if let Some(coordinates) = compass.take_geocode_request() {
            block_on(compass.reverse_geocode(&mut ui.geocoder, coordinates));
        }

        // --- State → page -------------------------------------------------
        for event in ui.events.poll() {
            if let PageEvent::Heading(reading) = &event
                && ui.detent.update(reading.raw)
            {
                info!("Detent tick (slot {})", ui.detent.slot());
            }
            ui.page.on_event(&event);
        }

        ui.page
            .update(embassy_time::Duration::from_micros(dt.as_micros() as u64));

        // --- Render -------------------------------------------------------
        ui.render();
        ui.window.update(&ui.display);

        // --- Frame pacing -------------------------------------------------
        let elapsed = frame_start.elapsed();
        if elapsed < ui.frame_duration {
            std::thread::sleep(ui.frame_duration - elapsed);
        }
    }
}

/// Read the optional configuration file, falling back to defaults.
fn load_config() -> CompassConfig {
    let Ok(path) = std::env::var(CONFIG_ENV_VAR) else {
        return CompassConfig::default();
    };

    match std::fs::read(&path) {
        Ok(bytes) => CompassConfig::from_bytes(&bytes).unwrap_or_else(|e| {
            warn!("Ignoring {}: {}", path, e);
            CompassConfig::default()
        }),
        Err(e) => {
            warn!("Cannot read {}: {}", path, e);
            CompassConfig::default()
        }
    }
}

fn run() -> Result<(), AppError> {
    let compass = Compass::new(load_config());
    let mut orientation = SimulatedOrientation::new(INITIAL_HEADING_DEG);
    let mut location = SimulatedLocation::new();

    let Some(mut ui) = Ui::new(&compass) else {
        error!("No free state subscriber slots");
        return Ok(());
    };

    // The SDL window is lazily initialized on the first `update()` call.
    // We must call `update()` once before `events()` or it will panic.
    ui.render();
    ui.window.update(&ui.display);

    let mut orientation_session = compass.start(&mut orientation)?;
    let mut permission = Permission::Denied;

    loop {
        let location_session = compass.start_location_updates(permission, &mut location)?;

        match run_frames(&compass, &mut ui, &mut orientation_session, location_session) {
            Exit::Quit => break,
            Exit::TogglePermission => {
                permission = match permission {
                    Permission::Granted => Permission::Denied,
                    Permission::Denied => Permission::Granted,
                };
                info!("Location permission: {:?}", permission);
            }
        }
    }

    Ok(())
}

fn main() {
    env_logger::init();
    info!("Starting compass simulator");
    info!(
        "Display: {}×{} (scale {}×)",
        DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX, WINDOW_SCALE
    );
    info!("Keys: ←/→=Nudge  L=Location permission  G=Geocoder failure  Q=Quit");

    if let Err(e) = run() {
        error!("Simulator stopped: {}", e);
        std::process::exit(1);
    }

    info!("Simulator exiting");
}
