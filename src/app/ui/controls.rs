use eframe::egui::{TextEdit, Ui};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use super::super::{ViewKind, ViewModel};

fn fuzzy_match_score(matcher: &SkimMatcherV2, text: &str, query: &str) -> Option<i64> {
    matcher
        .fuzzy_match(text, query)
        .or_else(|| matcher.fuzzy_match(&text.to_ascii_lowercase(), &query.to_ascii_lowercase()))
}

impl ViewModel {
    pub(in crate::app) fn draw_controls(&mut self, ui: &mut Ui) {
        ui.heading("View");
        ui.horizontal(|ui| {
            ui.selectable_value(
                &mut self.active_view,
                ViewKind::TopView,
                ViewKind::TopView.label(),
            );
            ui.selectable_value(
                &mut self.active_view,
                ViewKind::FirstPerson,
                ViewKind::FirstPerson.label(),
            );
        });
        if ui.button("Reset camera").clicked() {
            match self.active_view {
                ViewKind::TopView => self.orbit.reset(),
                ViewKind::FirstPerson => self.first_person.reset(),
            }
        }

        ui.separator();
        ui.checkbox(&mut self.show_mini_map, "Mini-map");
        ui.checkbox(&mut self.show_fps_bar, "Statistics");
        ui.checkbox(&mut self.show_help, "Help");

        ui.separator();
        ui.heading("Search");
        ui.add(TextEdit::singleline(&mut self.search).hint_text("person name"));

        let query = self.search.trim().to_owned();
        if !query.is_empty() {
            let matcher = SkimMatcherV2::default();
            let mut matches = self
                .graph
                .persons
                .iter()
                .enumerate()
                .filter_map(|(index, person)| {
                    fuzzy_match_score(&matcher, &person.name, &query).map(|score| (score, index))
                })
                .collect::<Vec<_>>();
            matches.sort_by(|a, b| b.0.cmp(&a.0));

            for (_score, index) in matches.into_iter().take(8) {
                let name = self.graph.persons[index].name.clone();
                let is_selected = self.selected == Some(index);
                if ui.selectable_label(is_selected, name).clicked() {
                    self.selected = if is_selected { None } else { Some(index) };
                }
            }
        }

        if let Some(selected) = self.selected {
            ui.separator();
            let person = &self.graph.persons[selected];
            ui.heading(&person.name);
            ui.label(format!("id: {}", person.id));
            ui.label(format!("marker: {}", person.connection_id));
            ui.label(format!("tags: [{}]", person.tags.join(", ")));
            ui.label(format!(
                "position: ({:.2}, {:.2}, {:.2})",
                person.position.x, person.position.y, person.position.z
            ));
            if let Some(mood) = person.mood {
                ui.label(format!("mood: {}", mood.glyph()));
            }
            if ui.button("Clear selection").clicked() {
                self.selected = None;
            }
        }
    }
}
