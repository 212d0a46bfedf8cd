//! Game identifiers used by the context detectors.

use phf::phf_set;

/// Map ids of World-vs-World maps.
pub mod map_id {
    pub const ETERNAL_BATTLEGROUNDS: u32 = 38;
    pub const RED_BORDERLANDS: u32 = 94;
    pub const BLUE_BORDERLANDS: u32 = 95;
    pub const GREEN_BORDERLANDS: u32 = 96;
    pub const ARMISTICE_BASTION: u32 = 968;
    pub const OBSIDIAN_SANCTUM: u32 = 1099;
    pub const EDGE_OF_THE_MISTS: u32 = 1143;
    pub const ALPINE_BORDERLANDS: u32 = 1206;
    pub const DESERT_BORDERLANDS: u32 = 1323;
}

/// External status "area kind" values.
pub mod map_type {
    pub const ETERNAL_BATTLEGROUNDS: u32 = 9;
    pub const BLUE_BORDERLANDS: u32 = 10;
    pub const GREEN_BORDERLANDS: u32 = 11;
    pub const RED_BORDERLANDS: u32 = 12;
    pub const FORTUNES_VALE: u32 = 13;
    pub const OBSIDIAN_SANCTUM: u32 = 14;
    pub const EDGE_OF_THE_MISTS: u32 = 15;
    pub const WVW_LOUNGE: u32 = 18;
}

static WVW_MAP_IDS: phf::Set<u32> = phf_set! {
    38u32, 94u32, 95u32, 96u32, 968u32, 1099u32, 1143u32, 1206u32, 1323u32,
};

static WVW_MAP_TYPES: phf::Set<u32> = phf_set! {
    9u32, 10u32, 11u32, 12u32, 13u32, 14u32, 15u32, 18u32,
};

/// Map id treated as qualifying by the external status detector regardless
/// of its reported map type.
pub const EXTERNAL_MAP_ID_OVERRIDE: u32 = map_id::ARMISTICE_BASTION;

pub fn is_wvw_map(map_id: u32) -> bool {
    WVW_MAP_IDS.contains(&map_id)
}

pub fn is_wvw_map_type(map_type: u32) -> bool {
    WVW_MAP_TYPES.contains(&map_type)
}
