#![no_std]
#![no_main]

mod peripherals;

// Panic handler and debugging
use defmt::unwrap;

use defmt_rtt as _;
use panic_probe as _;

// Device
use embassy_executor::Spawner;
use embassy_futures::select::{select3, Either3};
use embassy_nrf::{
    bind_interrupts,
    gpio::{Input, Level, Output, OutputDrive, Pin, Pull},
    peripherals::{SPI2, TWISPI1},
    spim,
    twim::{self, Twim},
};
use embassy_sync::{blocking_mutex::raw::ThreadModeRawMutex, channel::Channel, signal::Signal};
use embassy_time::{Duration, Instant, Ticker, Timer};

bind_interrupts!(struct Irqs {
    SPIM1_SPIS1_TWIM1_TWIS1_SPI1_TWI1 => twim::InterruptHandler<TWISPI1>;
    SPIM2_SPIS2_SPI2 => spim::InterruptHandler<SPI2>;
});

// Crate
use peripherals::{backlight, backlight::Backlight, display::Display, touch::TouchController};
use smiley_watchface::{
    graphics::{DisplayCanvas, SmileyBitmap, SmileyResources},
    system::{
        config::WatchFaceConfig,
        host::{self, DimensionId, Resources, SubscriptionToken, TimeService, TimerToken},
        time::{TimeManager, TimeReference},
        timer::DeadlineTimer,
    },
    ui::{
        animation::TapEvent,
        assets::BitmapId,
        mode::AmbientProperties,
        SmileyWatchFace, WatchFace,
    },
};

// Others
use chrono::FixedOffset;

// Include current UTC epoch at compile time
include!(concat!(env!("OUT_DIR"), "/utc.rs"));
const TIMEZONE: i32 = 1 * 3_600;

/// Without touches the face drops to ambient after this long
const AMBIENT_AFTER: Duration = Duration::from_secs(10);

// Communication channels
static TAP_EVENTS: Channel<ThreadModeRawMutex, TapEvent, 4> = Channel::new();
static TIME_TICK: Signal<ThreadModeRawMutex, ()> = Signal::new();

/// Host services backed by the procedural frames, the RTC uptime and the
/// build-time clock reference.
struct PineTimeHost {
    resources: SmileyResources,
    time: TimeManager,
    timer: DeadlineTimer,
}

impl Resources for PineTimeHost {
    type Bitmap = SmileyBitmap;

    fn load_bitmap(&mut self, id: BitmapId) -> smiley_watchface::Result<SmileyBitmap> {
        self.resources.load_bitmap(id)
    }

    fn scale_bitmap(
        &mut self,
        bitmap: &SmileyBitmap,
        width: u32,
        height: u32,
        filter: bool,
    ) -> smiley_watchface::Result<SmileyBitmap> {
        self.resources.scale_bitmap(bitmap, width, height, filter)
    }

    fn desaturate(&mut self, bitmap: &SmileyBitmap) -> smiley_watchface::Result<SmileyBitmap> {
        self.resources.desaturate(bitmap)
    }

    fn dimension(&self, id: DimensionId) -> f32 {
        self.resources.dimension(id)
    }
}

impl TimeService for PineTimeHost {
    fn now_millis(&self) -> i64 {
        self.time.now_millis(Instant::now())
    }

    fn current_time_zone(&self) -> FixedOffset {
        self.time.time_zone()
    }

    fn subscribe_time_zone_changes(&mut self) -> SubscriptionToken {
        self.time.subscribe()
    }

    fn unsubscribe_time_zone_changes(&mut self, token: SubscriptionToken) {
        self.time.unsubscribe(token)
    }
}

impl host::Timer for PineTimeHost {
    fn post_delayed(&mut self, delay: Duration) -> TimerToken {
        self.timer.post(Instant::now(), delay)
    }

    fn cancel(&mut self, token: TimerToken) {
        self.timer.cancel(token)
    }
}

/// Drive the watch face: taps, minute ticks, frame timers and the switch
/// to ambient mode.
#[embassy_executor::task(pool_size = 1)]
async fn update_lcd(mut display: Display, mut backlight: Backlight, host: PineTimeHost) {
    let mut face = unwrap!(SmileyWatchFace::create(host, WatchFaceConfig::default()));
    let (width, height) = display.size();
    unwrap!(face.on_surface_changed(width, height));
    face.on_apply_shape(false);
    unwrap!(face.on_properties_changed(AmbientProperties::default()));
    face.on_visibility_changed(true);

    let mut last_touch = Instant::now();
    let mut ambient = false;

    loop {
        let frame_at = face.host().timer.deadline();
        let ambient_at = (!ambient).then(|| last_touch + AMBIENT_AFTER);
        let wake_at = match (frame_at, ambient_at) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };
        let wake = async {
            match wake_at {
                Some(at) => Timer::at(at).await,
                None => core::future::pending::<()>().await,
            }
        };

        match select3(TAP_EVENTS.receive(), TIME_TICK.wait(), wake).await {
            Either3::First(event) => {
                last_touch = Instant::now();
                if ambient {
                    ambient = false;
                    backlight.set(backlight::ACTIVE);
                    face.on_ambient_mode_changed(false);
                }
                face.on_tap(event);
            }
            Either3::Second(()) => face.on_time_tick(),
            Either3::Third(()) => {
                let now = Instant::now();
                if !ambient && now >= last_touch + AMBIENT_AFTER {
                    defmt::info!("Entering ambient mode");
                    ambient = true;
                    backlight.set(backlight::AMBIENT);
                    face.on_ambient_mode_changed(true);
                }

                if let Some(token) = face.host_mut().timer.expired(now) {
                    if face.on_timer(token) {
                        let bounds = display.bounds();
                        let mut canvas = DisplayCanvas::new(display.lcd_mut());
                        if let Err(error) = face.on_draw(&mut canvas, bounds) {
                            defmt::warn!("Drawing failed: {}", error);
                        }
                    }
                }
            }
        }
    }
}

/// Emit the once-per-minute time tick.
#[embassy_executor::task(pool_size = 1)]
async fn update_time() {
    let mut tick = Ticker::every(Duration::from_secs(60));
    loop {
        defmt::debug!("Time tick");
        TIME_TICK.signal(());

        // Re-schedule the timer interrupt
        tick.next().await;
    }
}

/// Polls the touch controller every 2ms
#[embassy_executor::task(pool_size = 1)]
async fn poll_touch(mut touch: TouchController<TWISPI1>) {
    loop {
        // Check for touch event
        if let Some(event) = touch.try_event_detected() {
            TAP_EVENTS.send(event).await;
        }

        // Re-schedule the timer interrupt in 2ms
        Timer::after(Duration::from_millis(2)).await;
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_nrf::init(Default::default());
    defmt::info!("Initializing");

    // Initialize Backlight
    let backlight = Backlight::init(
        Output::new(p.P0_14.degrade(), Level::High, OutputDrive::Standard),
        Output::new(p.P0_22.degrade(), Level::High, OutputDrive::Standard),
        Output::new(p.P0_23.degrade(), Level::High, OutputDrive::Standard),
        backlight::ACTIVE,
    );

    // Initialize I2C
    let mut i2c_config = twim::Config::default();
    // Use I2C at 400KHz (the fastest clock available on the nRF52832),
    i2c_config.frequency = twim::Frequency::K400;

    let i2c = Twim::new(p.TWISPI1, Irqs, p.P0_06, p.P0_07, i2c_config);

    // Initialize SPI
    let mut spim_config = spim::Config::default();
    // Use SPI at 8MHz (the fastest clock available on the nRF52832),
    // otherwise refreshing will be super slow.
    spim_config.frequency = spim::Frequency::M8;
    // SPI must be used in mode 3. Mode 0 (the default) won't work.
    spim_config.mode = spim::MODE_3;

    let spim = spim::Spim::new(p.SPI2, Irqs, p.P0_02, p.P0_04, p.P0_03, spim_config);

    // Initialize LCD
    let display = unwrap!(Display::init(
        spim,
        Output::new(p.P0_25.degrade(), Level::Low, OutputDrive::Standard),
        Output::new(p.P0_18.degrade(), Level::Low, OutputDrive::Standard),
        Output::new(p.P0_26.degrade(), Level::Low, OutputDrive::Standard),
    ));

    // Initialize touch controller
    let touch = TouchController::init(
        i2c,
        Input::new(p.P0_28.degrade(), Pull::Up), // Touchpad external interrupt pin: P0.28/AIN4 (TP_INT)
        Output::new(p.P0_10.degrade(), Level::High, OutputDrive::Standard), // Touchpad reset pin: P0.10/NFC2 (TP_RESET)
    );

    // Clock starts at the build time
    let host = PineTimeHost {
        resources: SmileyResources::default(),
        time: TimeManager::init(
            TimeReference::from_timestamp(UTC_TIME, Instant::now()),
            unwrap!(FixedOffset::east_opt(TIMEZONE)),
        ),
        timer: DeadlineTimer::new(),
    };

    defmt::info!("Initialization finished");

    // Schedule tasks
    unwrap!(spawner.spawn(poll_touch(touch)));
    unwrap!(spawner.spawn(update_time()));
    unwrap!(spawner.spawn(update_lcd(display, backlight, host)));
}
