/// Celestial body catalog: lab placement, platform targets, info texts and
/// where each body flies to once the lab opens up.
///
/// Positions and scales are in lab world units. Model scales differ wildly
/// because the source models were authored at very different sizes.

use glam::Vec3;
use orrery_engine::AssetManifest;

/// Planet index constants, in order from the Sun.
pub const MERCURY: usize = 0;
pub const VENUS: usize = 1;
pub const EARTH: usize = 2;
pub const MARS: usize = 3;
pub const JUPITER: usize = 4;
pub const SATURN: usize = 5;
pub const URANUS: usize = 6;
pub const NEPTUNE: usize = 7;
pub const PLANET_COUNT: usize = 8;

// ── Scenery ──────────────────────────────────────────────────────────

pub const LAB_NAME: &str = "lab";
pub const LAB_ASSET: &str = "assets/models/the_design_lab.glb";
pub const LAB_SCALE: f32 = 10.0;

/// The first platform is loaded; the others are clones of its model.
pub const PLATFORM_NAME: &str = "platform0";
pub const PLATFORM_ASSET: &str = "assets/models/sci_fi_platform.glb";
pub const PLATFORM_SCALE: f32 = 0.2;
/// Target zones float this far above their platform.
pub const TARGET_HEIGHT: f32 = 2.0;

pub const SKYDOME_TEXTURE: &str = "assets/textures/Skybox/space_skydome.jpg";
pub const SKYDOME_SIZE: f32 = 10_000.0;
pub const SKYDOME_RESOLUTION: u32 = 32;

/// Platform positions: the first sits by the button, the rest line the table.
pub fn platform_position(index: usize) -> Vec3 {
    if index == 0 {
        Vec3::new(-12.2, 17.5, -6.0)
    } else {
        Vec3::new(-12.2, 17.5, 6.0 * (index as f32 - 1.0))
    }
}

// ── Bodies ───────────────────────────────────────────────────────────

/// Everything the lab needs to know about one planet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodySpec {
    pub name: &'static str,
    pub asset: &'static str,
    /// Starting position in the lab.
    pub position: Vec3,
    /// Uniform model scale in the lab.
    pub scale: f32,
    /// Uniform scale of the target zone over the body's platform.
    pub target_scale: f32,
    /// Info card anchor above the model, in model space.
    pub label_offset: Vec3,
    /// Short card text shown on hover.
    pub info: &'static str,
    /// Full text shown once the lab opens up.
    pub description: &'static str,
    /// Where the body ends up in space.
    pub destination: Vec3,
    /// Scale multiplier applied on the way out.
    pub space_scale: f32,
}

/// Bodies that are not puzzle pieces but hang off one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SatelliteSpec {
    pub name: &'static str,
    pub asset: &'static str,
    pub parent: usize,
    /// Position in the parent's model space.
    pub local_position: Vec3,
    pub scale: f32,
}

pub const MOON: SatelliteSpec = SatelliteSpec {
    name: "Moon",
    asset: "assets/solarsystem/moon.glb",
    parent: EARTH,
    local_position: Vec3::new(700.0, 700.0, 0.0),
    scale: 0.3,
};

pub const PLANETS: [BodySpec; PLANET_COUNT] = [
    BodySpec {
        name: "Mercury",
        asset: "assets/solarsystem/mercury.glb",
        position: Vec3::new(-6.2, 19.5, -6.0),
        scale: 1.2,
        target_scale: 0.5,
        label_offset: Vec3::new(0.0, 7.0, 0.0),
        info: "Size: 4,879 km \nDistance from Sun: 57,900,000 km (0.39 AU)",
        description: concat!(
            "Mercury\n\n",
            "Size: 4,879 km \nDistance from Sun: 57,900,000 km (0.39 AU)\n\n",
            "The smallest planet in our solar system and nearest to the Sun, Mercury is only ",
            "slightly larger than Earth's Moon.\n\n",
            "From the surface of Mercury, the Sun would appear more than three times as large as ",
            "it does when viewed from Earth, and the sunlight would be as much as 11 times brighter. ",
            "Despite its proximity to the Sun, Mercury is not the hottest planet in our solar system."
        ),
        destination: Vec3::new(-40.0, 100.0, -50.0),
        space_scale: 6.0,
    },
    BodySpec {
        name: "Venus",
        asset: "assets/solarsystem/venus.glb",
        position: Vec3::new(-12.2, 19.5, 0.0),
        scale: 0.4,
        target_scale: 0.5,
        label_offset: Vec3::new(0.0, 21.0, 0.0),
        info: "Size: 12,104 km \nDistance from Sun: 108,200,000 km (0.72 AU)",
        description: concat!(
            "Venus\n\n",
            "Size: 12,104 km \nDistance from Sun: 108,200,000 km (0.72 AU)\n\n",
            "Venus is the second planet from the Sun and is Earth's closest planetary neighbor. ",
            "It's one of the four inner, terrestrial (or rocky) planets, and it's often called ",
            "Earth's twin because it's similar in size and density.\n\n",
            "Venus has a thick, toxic atmosphere filled with carbon dioxide and it's perpetually ",
            "shrouded in thick, yellowish clouds of sulfuric acid that trap heat, causing a runaway ",
            "greenhouse effect. It's the hottest planet in our solar system, even though Mercury is ",
            "closer to the Sun."
        ),
        destination: Vec3::new(-40.0, 100.0, -35.0),
        space_scale: 6.0,
    },
    BodySpec {
        name: "Earth",
        asset: "assets/solarsystem/earth.glb",
        position: Vec3::new(-12.2, 19.5, 6.0),
        scale: 0.001,
        target_scale: 0.8,
        label_offset: Vec3::new(0.0, 8400.0, 0.0),
        info: "Size: 12,756 km \nDistance from Sun: 149,600,000 km (1.0 AU)",
        description: concat!(
            "Earth\n\n",
            "Size: 12,756 km \nDistance from Sun: 149,600,000 km (1.0 AU)\n\n",
            "Our home planet is the third planet from the Sun, and the only place we know of so far ",
            "that's inhabited by living things.\n\n",
            "While Earth is only the fifth largest planet in the solar system, it is the only world ",
            "in our solar system with liquid water on the surface."
        ),
        destination: Vec3::new(-40.0, 100.0, -18.0),
        space_scale: 6.0,
    },
    BodySpec {
        name: "Mars",
        asset: "assets/solarsystem/mars.glb",
        position: Vec3::new(-12.2, 19.5, 12.0),
        scale: 0.5,
        target_scale: 0.5,
        label_offset: Vec3::new(0.0, 16.8, 0.0),
        info: "Size: 6,792 km \nDistance from Sun: 227,900,000 km (1.52 AU)",
        description: concat!(
            "Mars\n\n",
            "Size: 6,792 km \nDistance from Sun: 227,900,000 km (1.52 AU)\n\n",
            "Mars is the fourth planet from the Sun, a dusty, cold, desert world with a very thin ",
            "atmosphere. Mars is also a dynamic planet with seasons, polar ice caps, canyons, ",
            "extinct volcanoes, and evidence that it was even more active in the past."
        ),
        destination: Vec3::new(-40.0, 100.0, -2.0),
        space_scale: 6.0,
    },
    BodySpec {
        name: "Jupiter",
        asset: "assets/solarsystem/jupiter.glb",
        position: Vec3::new(-12.2, 20.2, 18.0),
        scale: 0.07,
        target_scale: 1.5,
        label_offset: Vec3::new(0.0, 110.0, 0.0),
        info: "Size: 142,984 km \nDistance from Sun: 778,600,000 km (5.2 AU)",
        description: concat!(
            "Jupiter\n\n",
            "Size: 142,984 km \nDistance from Sun: 778,600,000 km (5.2 AU)\n\n",
            "Fifth in line from the Sun, Jupiter is, by far, the largest planet in the solar ",
            "system, more than twice as massive as all the other planets combined.\n\n",
            "Jupiter's familiar stripes and swirls are actually cold, windy clouds of ammonia and ",
            "water, floating in an atmosphere of hydrogen and helium. Jupiter's iconic Great Red ",
            "Spot is a giant storm bigger than Earth that has raged for hundreds of years."
        ),
        destination: Vec3::new(-40.0, 105.0, 20.0),
        space_scale: 4.0,
    },
    BodySpec {
        name: "Saturn",
        asset: "assets/solarsystem/saturn.glb",
        position: Vec3::new(-12.2, 20.2, 24.0),
        scale: 0.0025,
        target_scale: 1.5,
        label_offset: Vec3::new(0.0, 3080.0, 0.0),
        info: "Size: 120,536 km \nDistance from Sun: 1,433,500,000 km (9.54 AU)",
        description: concat!(
            "Saturn\n\n",
            "Size: 120,536 km \nDistance from Sun: 1,433,500,000 km (9.54 AU)\n\n",
            "Saturn is the sixth planet from the Sun and the second-largest planet in our solar ",
            "system.\n\n",
            "Adorned with thousands of beautiful ringlets, Saturn is unique among the planets."
        ),
        destination: Vec3::new(-40.0, 105.0, 48.0),
        space_scale: 4.0,
    },
    BodySpec {
        name: "Uranus",
        asset: "assets/solarsystem/uranus.glb",
        position: Vec3::new(-12.2, 20.2, 30.0),
        scale: 0.01,
        target_scale: 1.0,
        label_offset: Vec3::new(0.0, 770.0, 0.0),
        info: "Size: 51,118 km \nDistance from Sun: 2,872,500,000 km (19.2AU)",
        description: concat!(
            "Uranus\n\n",
            "Size: 51,118 km \nDistance from Sun: 2,872,500,000 km (19.2AU)\n\n",
            "Uranus is the seventh planet from the Sun, and has the third-largest diameter in our ",
            "solar system. It was the first planet found with the aid of a telescope."
        ),
        destination: Vec3::new(-40.0, 100.0, 72.0),
        space_scale: 5.0,
    },
    BodySpec {
        name: "Neptune",
        asset: "assets/solarsystem/neptune.glb",
        position: Vec3::new(-12.2, 19.9, 36.0),
        scale: 0.12,
        target_scale: 1.0,
        label_offset: Vec3::new(0.0, 66.8, 0.0),
        info: "Size: 49,528 km \nDistance from Sun: 4,495,100,000 km (30.06 AU)",
        description: concat!(
            "Neptune\n\n",
            "Size: 49,528 km \nDistance from Sun: 4,495,100,000 km (30.06 AU)\n\n",
            "Dark, cold, and whipped by supersonic winds, ice giant Neptune is the eighth and most ",
            "distant planet in our solar system.\n\n",
            "More than 30 times as far from the Sun as Earth, Neptune is the only planet in our ",
            "solar system not visible to the naked eye and the first predicted by mathematics ",
            "before its discovery."
        ),
        destination: Vec3::new(-40.0, 100.0, 92.0),
        space_scale: 5.0,
    },
];

/// Manifest used when the host does not push one: the eight planets, the
/// Moon, the lab and the first platform, plus the space skydome.
pub fn builtin_manifest() -> AssetManifest {
    let manifest = PLANETS
        .iter()
        .fold(AssetManifest::default(), |m, body| m.with_mesh(body.name, body.asset));
    manifest
        .with_mesh(MOON.name, MOON.asset)
        .with_mesh(LAB_NAME, LAB_ASSET)
        .with_mesh(PLATFORM_NAME, PLATFORM_ASSET)
        .with_skybox(SKYDOME_TEXTURE, SKYDOME_SIZE, SKYDOME_RESOLUTION)
}
