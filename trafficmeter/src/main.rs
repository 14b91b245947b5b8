mod store;

use std::sync::Arc;

use iced::widget::{Row, button, column, container, row, slider, text, text_input, toggler};
use iced::{Element, Task, Theme};
use trafficmeter_core::{
    Argb, ChoiceList, MaskConfig, ProcNetDev, ScreenChoices, SettingChange, SettingsError,
    TrafficSettingsController, standard_resources,
};

use store::JsonFileStore;

pub fn main() -> iced::Result {
    env_logger::init();

    iced::application(TrafficMeterApp::default, TrafficMeterApp::update, TrafficMeterApp::view)
        .title("Network Traffic Indicator")
        .theme(TrafficMeterApp::theme)
        .run()
}

struct TrafficMeterApp {
    controller: Option<TrafficSettingsController>,
    status: Option<String>,

    // Color text field, applied on submit
    color_input: String,
    confirm_reset: bool,
}

#[derive(Debug, Clone)]
enum Message {
    // List, toggle and slider edits
    Changed(SettingChange),

    // Color
    ColorInputChanged(String),
    ColorSubmitted,
    ResetRequested,
    ResetConfirmed,
    ResetCancelled,
}

impl Default for TrafficMeterApp {
    fn default() -> Self {
        let mut app = Self {
            controller: None,
            status: None,
            color_input: String::new(),
            confirm_reset: false,
        };

        match open_controller() {
            Ok(controller) => {
                app.color_input = controller.view().color_summary.clone();
                if !controller.view().traffic_supported {
                    app.status = Some("Traffic statistics are not available on this host".into());
                }
                app.controller = Some(controller);
            }
            Err(e) => {
                app.status = Some(format!("Failed to initialize: {}", e));
            }
        }

        app
    }
}

fn open_controller() -> Result<TrafficSettingsController, SettingsError> {
    let masks = MaskConfig::load(&standard_resources())?;
    let store = JsonFileStore::open(JsonFileStore::default_path())?;
    log::info!("settings file: {}", store.path().display());

    TrafficSettingsController::new(
        Arc::new(store),
        masks,
        ScreenChoices::standard(&masks),
        &ProcNetDev::new(),
    )
}

impl TrafficMeterApp {
    fn update(&mut self, message: Message) -> Task<Message> {
        let Some(controller) = self.controller.as_mut() else {
            return Task::none();
        };
        self.status = None;

        let result = match message {
            Message::Changed(change) => controller.apply(change).map(|_| ()),

            Message::ColorInputChanged(value) => {
                self.color_input = value;
                Ok(())
            }

            Message::ColorSubmitted => match self.color_input.parse::<Argb>() {
                Ok(color) => controller
                    .apply(SettingChange::Color(color))
                    .map(|_| self.color_input = color.summary()),
                Err(e) => Err(e),
            },

            Message::ResetRequested => {
                self.confirm_reset = true;
                Ok(())
            }

            Message::ResetConfirmed => {
                self.confirm_reset = false;
                controller
                    .reset_color()
                    .map(|()| self.color_input = Argb::DEFAULT.summary())
            }

            Message::ResetCancelled => {
                self.confirm_reset = false;
                Ok(())
            }
        };

        if let Err(e) = result {
            self.status = Some(e.to_string());
        }

        Task::none()
    }

    fn view(&self) -> Element<'_, Message> {
        let title = text("Network Traffic Indicator").size(24);

        let status = if let Some(ref msg) = self.status {
            text(msg).size(14)
        } else {
            text("").size(14)
        };

        let Some(controller) = self.controller.as_ref() else {
            return container(column![title, status].spacing(15).padding(20)).into();
        };
        let view = controller.view();
        let choices = controller.choices();
        let enabled = view.availability;
        let lists = view.traffic_supported;

        // Lists
        let display_section = column![
            text(format!("Display: {}", view.display.summary)).size(16),
            choice_row(&choices.display, view.display.index, lists, SettingChange::DisplayMode),
        ]
        .spacing(5);

        let monitor_section = column![
            text(format!("Monitor: {}", view.monitor.summary)).size(16),
            choice_row(
                &choices.monitor,
                view.monitor.index,
                lists && enabled.monitor,
                SettingChange::MonitorMode
            ),
        ]
        .spacing(5);

        let period_section = column![
            text(format!("Refresh period: {}", view.period.summary)).size(16),
            choice_row(
                &choices.period,
                view.period.index,
                lists && enabled.period,
                SettingChange::Period
            ),
        ]
        .spacing(5);

        let unit_section = column![
            text(format!("Unit: {}", view.unit.summary)).size(16),
            choice_row(
                &choices.unit,
                view.unit.index,
                lists && enabled.unit,
                SettingChange::Unit
            ),
        ]
        .spacing(5);

        // Color picker with reset
        let mut color_input = text_input("#aarrggbb", &self.color_input);
        if enabled.color {
            color_input = color_input
                .on_input(Message::ColorInputChanged)
                .on_submit(Message::ColorSubmitted);
        }
        let reset_button = if self.reset_available() {
            button("Reset").on_press(Message::ResetRequested)
        } else {
            button("Reset")
        };
        let color_section = column![
            text(format!("Color: {}", view.color_summary)).size(16),
            row![color_input, reset_button].spacing(10),
        ]
        .spacing(5);

        let confirm_section = if self.confirm_reset {
            column![
                text("Reset the indicator color to white?").size(14),
                row![
                    button("OK").on_press(Message::ResetConfirmed),
                    button("Cancel").on_press(Message::ResetCancelled),
                ]
                .spacing(10),
            ]
            .spacing(5)
        } else {
            column![]
        };

        // Autohide toggle and threshold
        let mut autohide = toggler(view.autohide).label("Autohide");
        if enabled.autohide {
            autohide =
                autohide.on_toggle(|value| Message::Changed(SettingChange::Autohide(value)));
        }

        let threshold_section = if enabled.autohide_threshold {
            column![
                text(format!("Autohide threshold: {} KB/s", view.autohide_threshold)).size(14),
                slider(0..=100, view.autohide_threshold, |value| {
                    Message::Changed(SettingChange::AutohideThreshold(value))
                })
                .step(1),
            ]
            .spacing(5)
        } else {
            column![text(format!("Autohide threshold: {} KB/s", view.autohide_threshold)).size(14)]
        };

        let content = column![
            title,
            status,
            display_section,
            monitor_section,
            period_section,
            unit_section,
            color_section,
            confirm_section,
            autohide,
            threshold_section,
        ]
        .spacing(15)
        .padding(20);

        container(content).into()
    }

    // Reset works in every display mode; only an open prompt blocks it.
    fn reset_available(&self) -> bool {
        !self.confirm_reset
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn choice_row<'a>(
    list: &'a ChoiceList,
    selected: usize,
    enabled: bool,
    change: fn(String) -> SettingChange,
) -> Element<'a, Message> {
    let buttons = list.iter().enumerate().map(|(index, (entry, value))| -> Element<'a, Message> {
        let btn = button(text(entry));
        if enabled && index != selected {
            btn.on_press(Message::Changed(change(value.to_owned()))).into()
        } else {
            // Selected or disabled - don't allow clicking
            btn.into()
        }
    });

    Row::with_children(buttons).spacing(10).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use trafficmeter_core::{MemoryStore, MockTrafficStats, SettingKey};

    fn app_with(store: Arc<MemoryStore>) -> TrafficMeterApp {
        let masks = MaskConfig::load(&standard_resources()).unwrap();
        let controller = TrafficSettingsController::new(
            store,
            masks,
            ScreenChoices::standard(&masks),
            &MockTrafficStats::supported(),
        )
        .unwrap();

        TrafficMeterApp {
            color_input: controller.view().color_summary.clone(),
            controller: Some(controller),
            status: None,
            confirm_reset: false,
        }
    }

    #[test]
    fn test_reset_available_with_display_off() {
        let store = Arc::new(MemoryStore::with_values([
            (SettingKey::State, 0),
            (SettingKey::Color, Argb(0xFF00_FF00).to_stored()),
        ]));
        let mut app = app_with(store.clone());

        let view = app.controller.as_ref().unwrap().view();
        assert!(!view.availability.color);
        assert!(app.reset_available());

        let _ = app.update(Message::ResetRequested);
        assert!(!app.reset_available());

        let _ = app.update(Message::ResetConfirmed);
        assert!(app.reset_available());
        assert_eq!(store.value(SettingKey::Color), Some(-1));
        assert_eq!(app.color_input, "#ffffffff");
        assert_eq!(app.status, None);
    }

    #[test]
    fn test_reset_cancel_keeps_color() {
        let store = Arc::new(MemoryStore::with_values([(
            SettingKey::Color,
            Argb(0xFF00_FF00).to_stored(),
        )]));
        let mut app = app_with(store.clone());

        let _ = app.update(Message::ResetRequested);
        let _ = app.update(Message::ResetCancelled);

        assert!(app.reset_available());
        assert_eq!(store.writes(), 0);
        assert_eq!(app.color_input, "#ff00ff00");
    }
}
