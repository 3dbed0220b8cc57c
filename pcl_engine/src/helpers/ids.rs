use rand::Rng;

/// Generates a public profile id such as `PCL-P-3FA2C91B`.
pub fn generate_profile_id(prefix: &str) -> String {
    let value: u32 = rand::thread_rng().gen();
    format!("PCL-{prefix}-{value:08X}")
}

pub fn new_player_id() -> String {
    generate_profile_id("P")
}

pub fn new_referee_id() -> String {
    generate_profile_id("R")
}

pub fn new_staff_id() -> String {
    generate_profile_id("S")
}
