use super::types::{FooterGroup, FooterItem};
use crate::app::state::{AppState, View};

fn item(key: impl Into<String>, desc: &'static str) -> FooterItem {
    FooterItem {
        key: key.into(),
        desc,
        highlighted: false,
    }
}

pub fn get_groups(state: &AppState) -> Vec<FooterGroup> {
    if state.palette.is_open() {
        return vec![FooterGroup {
            name: "PALETTE",
            items: vec![
                item("↑/↓", "move"),
                item("Enter", "run"),
                item("Esc", "close"),
                item("type", "filter"),
            ],
        }];
    }

    let view = state.dashboard.view;
    vec![
        FooterGroup {
            name: "VIEW",
            items: vec![
                FooterItem {
                    key: "1".to_string(),
                    desc: "home",
                    highlighted: view == View::Home,
                },
                FooterItem {
                    key: "2".to_string(),
                    desc: "tickets",
                    highlighted: view == View::Tickets,
                },
                FooterItem {
                    key: "3".to_string(),
                    desc: "reports",
                    highlighted: view == View::Reports,
                },
                FooterItem {
                    key: "4".to_string(),
                    desc: "settings",
                    highlighted: view == View::Settings,
                },
            ],
        },
        FooterGroup {
            name: "CMD",
            items: vec![item(state.config.palette.open_hint(), "palette"), item("n", "ticket"), item("r", "refresh")],
        },
        FooterGroup {
            name: "APP",
            items: vec![item("t", "theme"), item("q", "quit")],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::Registry;

    #[test]
    fn test_groups_follow_palette_state() {
        let mut state = AppState::default();
        assert_eq!(get_groups(&state)[0].name, "VIEW");
        assert!(get_groups(&state)[0].items[0].highlighted);

        state.palette.open(Registry::default(), &mut state.listeners);
        let groups = get_groups(&state);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].name, "PALETTE");
    }

    #[test]
    fn test_palette_hint_follows_open_key() {
        let mut state = AppState::default();
        assert_eq!(get_groups(&state)[1].items[0].key, "Ctrl-K");

        state.config.palette.open_key = 'p';
        assert_eq!(get_groups(&state)[1].items[0].key, "Ctrl-P");
    }
}
