//! Console command formatting.

use replay_core::{ChannelGroup, Vec3};

/// Sensor name the console expects for a channel group.
pub fn sensor_name(group: ChannelGroup) -> &'static str {
    match group {
        ChannelGroup::Accelerometer => "acceleration",
        ChannelGroup::Gyroscope => "gyroscope",
        ChannelGroup::Magnetometer => "magnetic-field",
    }
}

/// `sensor set <name> <x>:<y>:<z>`
pub fn sensor_set(group: ChannelGroup, value: Vec3) -> String {
    let [x, y, z] = value;
    format!("sensor set {} {x}:{y}:{z}", sensor_name(group))
}
