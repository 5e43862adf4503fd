use super::*;

fn drain(rx: &mut broadcast::Receiver<NavigationEvent>) -> Vec<NavigationEvent> {
    let mut out = Vec::new();
    while let Ok(ev) = rx.try_recv() {
        out.push(ev);
    }
    out
}

#[test]
fn emit_without_subscribers_is_harmless() {
    let nav = Navigator::new();
    assert_eq!(nav.emit(NavigationEvent::Start { id: 1, url: "/".into() }), 0);
}

#[test]
fn begin_then_end_emits_start_and_end() {
    let nav = Navigator::new();
    let mut rx = nav.subscribe();

    let navigation = nav.begin("/oauth2/consent");
    let id = navigation.id();
    navigation.end("/oauth2/consent");

    assert_eq!(
        drain(&mut rx),
        vec![
            NavigationEvent::Start { id, url: "/oauth2/consent".into() },
            NavigationEvent::End { id, url: "/oauth2/consent".into() },
        ]
    );
}

#[test]
fn dropped_navigation_emits_cancel() {
    let nav = Navigator::new();
    let mut rx = nav.subscribe();

    let id = {
        let navigation = nav.begin("/a");
        navigation.id()
    };

    let events = drain(&mut rx);
    assert_eq!(events.len(), 2);
    assert!(matches!(&events[1], NavigationEvent::Cancel { id: got, .. } if *got == id));
}

#[test]
fn finished_navigation_emits_one_terminal_event() {
    let nav = Navigator::new();
    let mut rx = nav.subscribe();

    nav.begin("/a").error("boom");

    let events = drain(&mut rx);
    assert_eq!(events.iter().filter(|e| e.is_terminal()).count(), 1);
    assert!(matches!(&events[1], NavigationEvent::Error { error, .. } if error == "boom"));
}

#[test]
fn ids_increase_per_navigation() {
    let nav = Navigator::new();
    let a = nav.begin("/a");
    let b = nav.begin("/b");
    assert!(b.id() > a.id());
    a.cancel("superseded");
    b.end("/b");
}

#[test]
fn only_start_is_not_terminal() {
    assert!(!NavigationEvent::Start { id: 1, url: "/".into() }.is_terminal());
    assert!(NavigationEvent::End { id: 1, url: "/".into() }.is_terminal());
    assert!(NavigationEvent::Cancel { id: 1, reason: String::new() }.is_terminal());
    assert!(NavigationEvent::Error { id: 1, error: String::new() }.is_terminal());
}
