// Shared tuning constants for the simulation, trigger layer and renderer.
//
// Positions and speeds are in canvas pixels (per tick for speeds); times are
// seconds unless the name says otherwise.

// Fixed timestep
pub const TICK_SEC: f32 = 1.0 / 60.0; // one simulation step
pub const PARTICLE_CAP: usize = 4000; // burst requests are dropped at or above this

// Particle bursts (universe mode)
pub const BURST_FRICTION: f32 = 0.96;
pub const BASS_GRAVITY: f32 = 0.2;
pub const LIGHT_GRAVITY: f32 = 0.05; // mid/high bursts
pub const BURST_LIFE_MIN: f32 = 0.5;
pub const BURST_LIFE_SPAN: f32 = 1.2;

// Default burst shapes: (count, speed, min size, max size)
pub const BASS_BURST: (usize, f32, f32, f32) = (60, 10.0, 2.0, 4.0);
pub const MID_BURST: (usize, f32, f32, f32) = (40, 6.0, 1.5, 3.0);
pub const HIGH_BURST: (usize, f32, f32, f32) = (20, 15.0, 1.0, 2.0);

// Supernova
pub const SUPERNOVA_MAX_SIZE_MIN: f32 = 300.0;
pub const SUPERNOVA_MAX_SIZE_SPAN: f32 = 400.0;
pub const SUPERNOVA_EASE: f32 = 0.05; // fraction of the remaining gap per tick
pub const SUPERNOVA_LIFE_STEP: f32 = 0.01;

// Meteors
pub const METEOR_EDGE_INSET: f32 = 10.0;
pub const METEOR_SPAWN_BAND: f32 = 0.4; // top fraction of the canvas
pub const METEOR_SPEED_X_MIN: f32 = 15.0;
pub const METEOR_SPEED_X_SPAN: f32 = 10.0;
pub const METEOR_SPEED_Y_MIN: f32 = 2.0;
pub const METEOR_SPEED_Y_SPAN: f32 = 4.0;
pub const METEOR_MARGIN: f32 = 100.0; // removed this far outside the canvas
pub const METEOR_STREAK: f32 = 3.0; // streak length in ticks of velocity

// Ships
pub const SHIP_ENTRY_OFFSET: f32 = 250.0;
pub const SHIP_FIRE_INTERVAL_SEC: f64 = 0.5;
pub const SHIP_ENGAGE_DISTANCE: f32 = 600.0;
pub const SHIP_SPEED_PHASE_STEP: f32 = 0.015;
pub const SHIP_SPEED_MOD: f32 = 6.0;
pub const SHIP_MICRO_FREQ: f32 = 2.5;
pub const SHIP_MICRO_AMP: f32 = 0.2; // fraction of the primary amplitude
pub const SHIP_DISENGAGE_MARGIN: f32 = 700.0;
pub const CIGAR_HEALTH: f32 = 200.0;
pub const UFO_HEALTH: f32 = 180.0;

// Weapons
pub const LASER_SPEED: f32 = 15.0;
pub const LASER_DAMAGE: f32 = 30.0;
pub const LASER_HIT_RADIUS: f32 = 35.0;
pub const LASER_MARGIN: f32 = 250.0;
pub const WAVE_DAMAGE: f32 = 25.0;

// Star field
pub const STAR_COUNT_REFERENCE: usize = 400; // at the reference area below
pub const STAR_REFERENCE_AREA: f32 = 1920.0 * 1080.0;
pub const STAR_COUNT_MIN: usize = 120;
pub const STAR_COUNT_MAX: usize = 900;
pub const STAR_SIZE_MAX: f32 = 1.5;
pub const STAR_BREATHE_MIN: f32 = 0.001; // radians per millisecond
pub const STAR_BREATHE_SPAN: f32 = 0.003;
pub const STAR_SETTLE_RATE: f32 = 0.2; // return-to-layout ease after a shift
pub const STAR_SETTLE_SNAP: f32 = 0.5;

// Camera shift
pub const SHIFT_DURATION_SEC: f64 = 2.5;
pub const SHIFT_ZOOM_DURATION_SEC: f64 = 4.0;
pub const SHIFT_SPEED_MIN: f32 = 0.6;
pub const SHIFT_SPEED_SPAN: f32 = 1.8;
pub const SHIFT_ZOOM_SPEED_MIN: f32 = 0.5;
pub const SHIFT_ZOOM_SPEED_SPAN: f32 = 0.5;
pub const SHIFT_ROTATE_STEP: f32 = 0.05;
pub const SHIFT_DRIFT_STEP: f32 = 50.0;
pub const SHIFT_DRIFT_WRAP: f32 = 100.0;
pub const SHIFT_ZOOM_FACTOR: f32 = 1.6;
pub const SHIFT_ZOOM_SPIRAL: f32 = 0.03;
pub const SHIFT_GAP_MIN_SEC: f64 = 5.0;
pub const SHIFT_GAP_SPAN_SEC: f64 = 5.0;

// Nebulae
pub const NEBULA_COUNT: usize = 5;
pub const NEBULA_RADIUS_MIN: f32 = 0.3; // fraction of canvas width
pub const NEBULA_RADIUS_SPAN: f32 = 0.4;

// Orbits
pub const ORBIT_SLOTS: usize = 8;
pub const ORBIT_ENERGY_BOOST: f32 = 0.05; // angle per tick at full energy
pub const ORBIT_TRAIL_SEGMENTS: usize = 15;
pub const ORBIT_TRAIL_LENGTH: f32 = std::f32::consts::PI * 0.8;
pub const ORBIT_TRAIL_ALPHA: f32 = 0.25;

// Comet
pub const COMET_RATE_PER_MS: f64 = 0.00006;
pub const COMET_SEMI_MAJOR: f32 = 2.5; // fraction of canvas width
pub const COMET_ECCENTRICITY: f32 = 0.96;
pub const COMET_TILT: f32 = 0.4;
pub const COMET_MARGIN: f32 = 400.0;
pub const COMET_TAIL_POINTS: usize = 18;
pub const COMET_TAIL_SPACING: f32 = 12.0;
pub const COMET_TAIL_JITTER: f32 = 10.0;
pub const COMET_SPARKLE_CHANCE: f32 = 0.4;
pub const COMET_SPARKLE_VOCAL_REF: f32 = 128.0; // vocal level for full sparkle rate

// Visibility sequencing
pub const VIS_RAMP_UP: f32 = 0.01;
pub const VIS_RAMP_DOWN: [f32; 4] = [0.01, 0.015, 0.008, 0.012]; // stars, core, solar, comet
pub const VIS_ENTRY_DELAY_SEC: [f32; 4] = [0.0, 2.0, 4.0, 3.0];
pub const VIS_ENTRY_SPAN_SEC: [f32; 4] = [2.0, 2.0, 4.0, 3.0];
pub const VIS_EXIT_DELAYS_SEC: [f64; 4] = [0.0, 0.5, 1.0, 1.5];

// Climax and universe triggers
pub const CLIMAX_THRESHOLDS: [f32; 4] = [240.0, 240.0, 245.0, 240.0]; // sub, kick, vocal, high
pub const SUPERNOVA_CHANCE: f32 = 0.02;
pub const SUPERNOVA_COOLDOWN_SEC: f64 = 1.0;
pub const METEOR_VOCAL_GATE: f32 = 220.0;
pub const METEOR_HIGH_GATE: f32 = 180.0;
pub const METEOR_CHANCE: f32 = 0.05;
pub const METEOR_COOLDOWN_SEC: f64 = 0.25;
pub const BATTLE_MIN_PLAYBACK_SEC: f32 = 10.0;
pub const BATTLE_MIN_ENERGY: f32 = 120.0;
pub const BATTLE_CHANCE: f32 = 0.0005;
pub const BATTLE_COOLDOWN_SEC: f64 = 5.0; // after a battle starts

// Pre-analyzed (phonetic) triggers
pub const ANALYSIS_FRAME_RATE: f32 = 30.0;
pub const PHONETIC_BASS_GATE: f32 = 200.0;
pub const PHONETIC_BASS_COOLDOWN_SEC: f64 = 0.4;
pub const PHONETIC_HIGH_GATE: f32 = 140.0;
pub const PHONETIC_HIGH_PLOSIVE: f32 = 220.0;
pub const PHONETIC_HIGH_COOLDOWN_SEC: f64 = 0.15;
pub const PHONETIC_MID_GATE: f32 = 160.0;
pub const PHONETIC_MID_COOLDOWN_SEC: f64 = 0.3;
pub const RICHNESS_SPLIT: f32 = 1.8;

// Realtime triggers
pub const REALTIME_BASS_GATE: f32 = 210.0;
pub const REALTIME_BASS_COOLDOWN_SEC: f64 = 0.6;
pub const REALTIME_MID_GATE: f32 = 160.0;
pub const REALTIME_MID_COOLDOWN_SEC: f64 = 0.45;
pub const REALTIME_HIGH_GATE: f32 = 100.0;
pub const REALTIME_HIGH_COOLDOWN_SEC: f64 = 0.25;

// Piano floor
pub const PIANO_COLUMNS: usize = 88;
pub const PIANO_MIN_HZ: f32 = 20.0;
pub const PIANO_MAX_HZ: f32 = 5000.0;
pub const PIANO_SAMPLE_RATE: f32 = 44100.0;
pub const PIANO_FFT_SIZE: usize = 1024;
pub const GRASS_FRACTION: f32 = 0.25; // of canvas height
pub const KEY_HEIGHT: f32 = 6.0;
pub const COLUMN_FIRE_INTENSITY: f32 = 0.8;
pub const COLUMN_FIRE_CHANCE: f32 = 0.06;
pub const KEY_LIT_INTENSITY: f32 = 0.4;
pub const KEY_GLOW_INTENSITY: f32 = 0.6;

// Piano-floor sparks and notes
pub const SPARK_BASE_COUNT: f32 = 10.0;
pub const SPARK_INTENSITY_COUNT: f32 = 15.0;
pub const SPARK_CONE: f32 = 0.6; // radians around straight up
pub const SPARK_GRAVITY: f32 = 0.15;
pub const NOTE_GRAVITY: f32 = -0.02; // notes float up
pub const NOTE_FRICTION: f32 = 0.98;
pub const NOTE_SPIN_MAX: f32 = 0.05;
pub const NOTE_GLYPHS: [&str; 4] = ["\u{2669}", "\u{266A}", "\u{266B}", "\u{266C}"];
pub const SMOKE_CHANCE: f32 = 0.2; // per note per tick
pub const SMOKE_GROWTH: f32 = 0.5;
pub const SMOKE_ALPHA: f32 = 0.3;

// Feature-track overlay
pub const FEATURE_DEFAULT_STEP_SEC: f32 = 0.1;
pub const ONSET_MIN_INTENSITY: f32 = 0.6;
