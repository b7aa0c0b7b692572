// Copyright (c) 2025 Unfolded Circle ApS, Markus Zehnder <markus.z@unfoldedcircle.com>
// SPDX-License-Identifier: MPL-2.0

//! Compiled-in room profiles. Can be replaced with the `rooms` section in the configuration file.

use super::{InputFallback, InputTarget, ReceiverSettings, RoomSettings};
use url::Url;

const FR_TV_ACTION_HOST: &str = "http://192.168.72.20:8080/tv/actions";
const FR_ROKU_ACTION_HOST: &str = "http://192.168.72.91:8080/systems/family-room/actions";
const FR_RECEIVER_HOST: &str = "http://192.168.72.91:8081/receiver/";
const MBR_TV_ACTION_HOST: &str = "http://192.168.72.25:8080/tv/actions";
const MBR_ROKU_ACTION_HOST: &str = "http://192.168.72.91:8080/systems/master-bedroom/actions";

/// Streaming box apps available in both rooms: name, app, aliases.
const STREAMING_APPS: &[(&str, &str, &[&str])] = &[
    ("daily-burn", "Daily Burn", &["DAILYBURN"]),
    ("netflix", "Netflix", &["NETFLIX", "NET", "FLIX"]),
    ("plex", "Plex", &["PLEX", "PLAQUES"]),
    ("prime", "Prime Video", &["PRIME", "AMAZON"]),
    ("hbo", "HBO GO", &["HBO"]),
    ("crunchyroll", "Crunchyroll", &["CRUNCHYROLL"]),
    ("hgtv", "Watch HGTV", &["HGTV"]),
    ("starz", "STARZ", &["STARS"]),
    ("pbs", "PBS Video", &["PBS"]),
    ("showtime", "Showtime Anytime", &["SHOWTIME"]),
    ("youtube", "YouTube", &["YOUTUBE"]),
    ("natgeo", "NatGeoTV", &["NATGEOTV", "NATGEO"]),
    ("smithsonian", "Smithsonian Channel", &["SMITHSONIAN"]),
];

fn url(value: &str) -> Url {
    // only called with the constants above
    Url::parse(value).expect("invalid compiled-in device url")
}

fn target(
    name: &str,
    aliases: &[&str],
    receiver_input: Option<&str>,
    streaming_app: Option<&str>,
    tv_input: &str,
) -> InputTarget {
    InputTarget {
        name: name.into(),
        aliases: aliases.iter().map(|a| a.to_string()).collect(),
        receiver_input: receiver_input.map(Into::into),
        streaming_app: streaming_app.map(Into::into),
        tv_input: tv_input.into(),
    }
}

/// Streaming apps are launched on the streaming box which is connected to TV input HDMI1.
fn streaming_targets(receiver_input: Option<&str>) -> impl Iterator<Item = InputTarget> + '_ {
    STREAMING_APPS
        .iter()
        .map(move |&(name, app, aliases)| target(name, aliases, receiver_input, Some(app), "HDMI1"))
}

/// Family room: TV, streaming box and an AV receiver handling all audio.
pub(super) fn family_room() -> RoomSettings {
    let mut inputs = vec![
        target("tv", &["TV", "T", "V"], Some("AV1"), None, "InputTV"),
        target(
            "retropie",
            &[
                "RETRO PI", "RETRO PIE", "RETROPI", "RETROPIE", "RETROPOT", "RETROBY", "RETRO",
                "PIE", "PI",
            ],
            Some("AV1"),
            None,
            "HDMI2",
        ),
        target(
            "ps3",
            &["PSTHREE", "PS3", "THREE", "3", "P.S.3"],
            Some("HDMI4"),
            None,
            "HDMI1",
        ),
        target(
            "ps4",
            &["PSFOUR", "PS4", "FOUR", "4", "P.S.4"],
            Some("HDMI2"),
            None,
            "HDMI1",
        ),
        target(
            "ps5",
            &["PSFIVE", "PS5", "FIVE", "5", "P.S.5"],
            Some("AV1"),
            None,
            "HDMI3",
        ),
        target(
            "wiiu",
            &[
                "WIIU", "WIYOU", "WILLYOU", "WEYOU", "WEEYOU", "WE", "WEE", "WE'LL",
            ],
            Some("HDMI3"),
            None,
            "HDMI1",
        ),
        target(
            "streaming-box",
            &["FIRETV", "FIRE", "ROKU"],
            Some("HDMI1"),
            None,
            "HDMI1",
        ),
        target("switch", &["SWITCH"], Some("HDMI5"), None, "HDMI1"),
        target("xbox", &["XBOX"], Some("V-AUX"), None, "HDMI1"),
        target(
            "dc-universe",
            &["DCUNIVERSE"],
            Some("HDMI1"),
            Some("DC Universe"),
            "HDMI1",
        ),
    ];
    inputs.extend(streaming_targets(Some("HDMI1")));

    RoomSettings {
        id: "fr".into(),
        name: "Family room".into(),
        app_id_env: Some("FR_APP_ID".into()),
        app_id: None,
        tv: url(FR_TV_ACTION_HOST),
        streaming_box: url(FR_ROKU_ACTION_HOST),
        receiver: Some(ReceiverSettings {
            url: url(FR_RECEIVER_HOST),
            fallback_volume: -30,
        }),
        inputs,
        fallback: InputFallback {
            receiver_input: Some("HDMI1".into()),
            tv_input: "HDMI1".into(),
        },
    }
}

/// Master bedroom: TV with built-in speakers and a streaming box, no receiver.
pub(super) fn master_bedroom() -> RoomSettings {
    let mut inputs = vec![
        target("tv", &["TV", "T", "V"], None, None, "InputTV"),
        target(
            "ps2",
            &["PS2", "TWO", "2", "PSTWO", "PS"],
            None,
            None,
            "InputAV1",
        ),
        target(
            "wii",
            &["WII", "WI", "WILL", "WE", "WEEK", "WIFI", "WEE", "WE'LL"],
            None,
            None,
            "InputComponent1",
        ),
        target("switch", &["SWITCH"], None, None, "HDMI2"),
    ];
    inputs.extend(streaming_targets(None));

    RoomSettings {
        id: "mbr".into(),
        name: "Master bedroom".into(),
        app_id_env: Some("MBR_APP_ID".into()),
        app_id: None,
        tv: url(MBR_TV_ACTION_HOST),
        streaming_box: url(MBR_ROKU_ACTION_HOST),
        receiver: None,
        inputs,
        fallback: InputFallback {
            receiver_input: None,
            tv_input: "HDMI1".into(),
        },
    }
}
