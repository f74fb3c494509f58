use bevy::audio::Volume;
use bevy::prelude::*;

use constants::path::MUSIC_PATH;
use constants::render_settings::MUSIC_VOLUME;

#[derive(Component)]
pub struct AmbientMusic;

pub fn ambient_playback() -> PlaybackSettings {
    PlaybackSettings::LOOP.with_volume(Volume::Linear(MUSIC_VOLUME))
}

// Browsers hold audio until the first user gesture; playback resumes then.
pub fn spawn_ambient_music(mut commands: Commands, asset_server: Res<AssetServer>) {
    commands.spawn((
        AudioPlayer::new(asset_server.load(MUSIC_PATH)),
        ambient_playback(),
        AmbientMusic,
    ));
    info!("Ambient music: {}", MUSIC_PATH);
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::audio::PlaybackMode;

    #[test]
    fn music_loops_at_half_volume() {
        let settings = ambient_playback();
        assert!(matches!(settings.mode, PlaybackMode::Loop));
        assert_eq!(settings.volume.to_linear(), 0.5);
        assert!(!settings.paused);
    }
}
