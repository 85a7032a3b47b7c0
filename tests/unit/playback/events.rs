use super::*;
use crate::playback::state::PlaybackState;

fn event(kind: PlaybackEventKind) -> PlaybackEvent {
    PlaybackEvent {
        kind,
        snapshot: PlaybackSnapshot {
            state: PlaybackState::Playing,
            ..PlaybackSnapshot::loading()
        },
    }
}

#[test]
fn event_log_clones_share_storage() {
    let log = EventLog::new();
    let mut sink = log.clone();
    sink.on_event(&event(PlaybackEventKind::Play));
    sink.on_event(&event(PlaybackEventKind::Pause));
    sink.on_event(&event(PlaybackEventKind::Play));

    assert_eq!(
        log.kinds(),
        vec![
            PlaybackEventKind::Play,
            PlaybackEventKind::Pause,
            PlaybackEventKind::Play
        ]
    );
    assert_eq!(log.count(PlaybackEventKind::Play), 2);
    assert_eq!(log.events()[1].snapshot.state, PlaybackState::Playing);

    log.clear();
    assert!(sink.events().is_empty());
}

#[test]
fn closures_are_listeners() {
    let mut seen = Vec::new();
    {
        let mut listener = |e: &PlaybackEvent| seen.push(e.kind);
        listener.on_event(&event(PlaybackEventKind::Loop));
    }
    assert_eq!(seen, vec![PlaybackEventKind::Loop]);
}

#[test]
fn tracing_listener_does_not_panic_without_subscriber() {
    TracingListener.on_event(&event(PlaybackEventKind::End));
}

#[test]
fn kinds_serialize_lowercase() {
    let json = serde_json::to_value(event(PlaybackEventKind::Load)).unwrap();
    assert_eq!(json["kind"], "load");
    assert_eq!(PlaybackEventKind::End.to_string(), "end");
}
