/// Flat colours, sRGB bytes.
pub const BLACK: [u8; 3] = [0x00, 0x00, 0x00];
pub const GREY: [u8; 3] = [0x80, 0x80, 0x80];
pub const RED: [u8; 3] = [0xff, 0x00, 0x00];
pub const BLUE: [u8; 3] = [0x00, 0x00, 0xff];
pub const WHITE: [u8; 3] = [0xff, 0xff, 0xff];
pub const YELLOW: [u8; 3] = [0xff, 0xe3, 0x6a];

pub const CHALK_LINE_MESH: &str = "chalk_line";
pub const BLOOD_MESH: &str = "blood";
pub const BLANKET_MESH: &str = "blanket";

pub const PROOF_CARD_ONE_MESH: &str = "proof_card_number_1";
pub const PROOF_CARD_TWO_MESH: &str = "proof_card_number_3";
pub const QUEENS_MESH: &str = "queens";
pub const BRIDGE_MESH: &str = "bridge";
pub const MURDERERS_MESH: &str = "murderers";
pub const NEON_SIGN_MESH: &str = "diner_text_REDUX";
pub const COP_LIGHT_CENTER_MESH: &str = "carlights";
pub const COP_LIGHT_RED_MESH: &str = "carlight_red";
pub const COP_LIGHT_BLUE_MESH: &str = "carlights_blue";
pub const DINER_LIGHT_MESH: &str = "diner_building_light";
pub const LANTERN_MESH: &str = "lanternlight";
