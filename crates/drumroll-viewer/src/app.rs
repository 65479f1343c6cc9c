//! Viewer application state

use drumroll_widgets::{TimelineMessage, TimelineWidget};
use iced::widget::{column, container, text};
use iced::{Element, Length, Subscription, Task, Theme};

use crate::session::Session;

#[derive(Debug, Clone)]
pub enum Message {
    Timeline(TimelineMessage),
}

enum Screen {
    Timeline(Box<TimelineWidget>),
    /// Loading failed; the window only shows why
    Failed(String),
}

pub struct DrumrollApp {
    title: String,
    screen: Screen,
}

impl DrumrollApp {
    pub fn new(session: anyhow::Result<Session>) -> Self {
        match session {
            Ok(session) => {
                let mut timeline = TimelineWidget::new(
                    session.dataset,
                    session.layout,
                    session.transport,
                    session.display,
                );
                timeline.mount();
                Self {
                    title: session.title,
                    screen: Screen::Timeline(Box::new(timeline)),
                }
            }
            Err(e) => {
                log::error!("Failed to load session: {:#}", e);
                Self {
                    title: "drumroll".to_string(),
                    screen: Screen::Failed(format!("{:#}", e)),
                }
            }
        }
    }

    pub fn title(&self) -> String {
        self.title.clone()
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match (message, &mut self.screen) {
            (Message::Timeline(msg), Screen::Timeline(timeline)) => timeline.update(msg),
            (Message::Timeline(_), Screen::Failed(_)) => {}
        }
        Task::none()
    }

    pub fn view(&self) -> Element<'_, Message> {
        let content: Element<'_, Message> = match &self.screen {
            Screen::Timeline(timeline) => timeline.view().map(Message::Timeline),
            Screen::Failed(reason) => column![
                text("Could not open session").size(18),
                text(reason.as_str()).size(13),
            ]
            .spacing(8)
            .into(),
        };

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .padding(12)
            .into()
    }

    pub fn subscription(&self) -> Subscription<Message> {
        match &self.screen {
            Screen::Timeline(timeline) => timeline.subscription().map(Message::Timeline),
            Screen::Failed(_) => Subscription::none(),
        }
    }

    pub fn theme(&self) -> Theme {
        Theme::Dark
    }
}

impl Drop for DrumrollApp {
    fn drop(&mut self) {
        if let Screen::Timeline(timeline) = &mut self.screen {
            timeline.unmount();
        }
    }
}
