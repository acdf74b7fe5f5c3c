// Shared visual tuning constants used by both the core state types and the
// web frontend. These are aesthetic defaults, not contracts; every consumer
// takes them through a config struct and may override them.

// Glyph rain
pub const RAIN_CELL_PX: f32 = 14.0; // glyph cell width == font size
pub const RAIN_FALL_SPEED: f32 = 0.4; // rows advanced per frame
pub const RAIN_TRAIL_ALPHA: f32 = 0.05; // per-frame black wash over the canvas
pub const RAIN_RESTART_WINDOW_FRAMES: f32 = 100.0; // restart delay drawn from [0, window)
pub const RAIN_GLYPH_MIN_OPACITY: f32 = 0.5;
pub const RAIN_GLYPH_OPACITY_SPAN: f32 = 0.5;
pub const RAIN_GLYPHS: &str =
    "アイウエオカキクケコサシスセソタチツテトナニヌネノハヒフヘホマミムメモヤユヨラリルレロワヲンABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

// Globe
pub const GLOBE_RADIUS: f32 = 1.0;
pub const GLOBE_SCALE: f32 = 1.5; // whole-group scale applied above the spin
pub const EARTH_ROTATION_RATE: f32 = 0.15; // radians per second
pub const CLOUD_RATE_MULTIPLIER: f32 = 1.3;
pub const MARKER_RADIUS: f32 = 1.007; // slightly off the surface to avoid z-fighting
pub const MARKER_DOT_RADIUS: f32 = 0.005;
pub const MARKER_GLOW_RADIUS: f32 = 0.008;
pub const MARKER_GLOW_OPACITY: f32 = 0.3;
pub const MARKER_STEM_RADIUS: f32 = 0.001;
pub const MARKER_STEM_LENGTH: f32 = 0.02;
pub const MARKER_STEM_OPACITY: f32 = 0.5;
pub const MARKER_COLOR: [f32; 3] = [1.0, 0.0, 0.0];

// Cloud and atmosphere shells
pub const CLOUD_SHELL_SCALE: f32 = 1.006;
pub const CLOUD_SHELL_OPACITY: f32 = 0.4;
pub const ATMOSPHERE_SHELL_SCALE: f32 = 1.02;
pub const ATMOSPHERE_SHELL_OPACITY: f32 = 0.1;
pub const ATMOSPHERE_COLOR: [f32; 3] = [0.266, 0.266, 1.0]; // #4444ff

// Wireframe grid shells
pub const GRID_COLOR: [f32; 3] = [0.0, 1.0, 0.0];

// Starfield
pub const STARFIELD_COUNT: usize = 7000;
pub const STARFIELD_RADIUS: f32 = 300.0;
pub const STARFIELD_DEPTH: f32 = 100.0;
pub const STARFIELD_YAW_RATE: f32 = 0.01; // radians per second around +y
pub const STARFIELD_WOBBLE_RATE: f32 = 0.1; // elevation nod frequency
pub const STARFIELD_WOBBLE_AMPLITUDE: f32 = 0.05; // elevation nod amplitude (radians)

// Camera / orbit controls
pub const CAMERA_DISTANCE: f32 = 4.0;
pub const CAMERA_FOV_DEGREES: f32 = 45.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 1000.0;
pub const ORBIT_MIN_DISTANCE: f32 = 2.0;
pub const ORBIT_MAX_DISTANCE: f32 = 8.0;
pub const ORBIT_ROTATE_SPEED: f32 = 0.3;
pub const ORBIT_ZOOM_SPEED: f32 = 0.5;

// Lighting
pub const AMBIENT_INTENSITY: f32 = 0.1;
pub const POINT_LIGHT_POSITION: [f32; 3] = [100.0, 10.0, -50.0];
pub const POINT_LIGHT_INTENSITY: f32 = 1.5;

// Texture sources for the globe surface and cloud layer
pub const EARTH_COLOR_MAP_URL: &str =
    "https://raw.githubusercontent.com/mrdoob/three.js/master/examples/textures/planets/earth_atmos_2048.jpg";
pub const EARTH_NORMAL_MAP_URL: &str =
    "https://raw.githubusercontent.com/mrdoob/three.js/master/examples/textures/planets/earth_normal_2048.jpg";
pub const EARTH_SPECULAR_MAP_URL: &str =
    "https://raw.githubusercontent.com/mrdoob/three.js/master/examples/textures/planets/earth_specular_2048.jpg";
pub const EARTH_CLOUDS_MAP_URL: &str =
    "https://raw.githubusercontent.com/mrdoob/three.js/master/examples/textures/planets/earth_clouds_1024.png";
