use pokedex;

mod config;
mod screen;
mod sprite;
mod widget;

use crate::config::Config;
use crate::pokedex::team::Store;
use crate::pokedex::{Session, Storage};
use crate::screen::{Roster, Search, roster, search};
use crate::widget::logo;

use iced::widget::{center, column, container, row, scrollable, text};
use iced::{Element, Fill, Font, Task, Theme};

pub fn main() -> iced::Result {
    tracing_subscriber::fmt::init();

    iced::application(Teamdex::new, Teamdex::update, Teamdex::view)
        .theme(Teamdex::theme)
        .default_font(Font::MONOSPACE)
        .window_size((1200.0, 800.0))
        .run()
}

struct Teamdex {
    state: State,
}

enum State {
    Loading,
    Ready {
        config: Config,
        session: Session,
        store: Store,
        search: Search,
        roster: Roster,
    },
    Failed(String),
}

#[derive(Debug, Clone)]
enum Message {
    Loaded(Result<(Config, Session, Store), anywho::Error>),
    Search(search::Message),
    Roster(roster::Message),
}

impl Teamdex {
    fn new() -> (Self, Task<Message>) {
        (
            Self {
                state: State::Loading,
            },
            Task::perform(boot(), Message::Loaded),
        )
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Loaded(Ok((config, session, store))) => {
                let (roster, task) = Roster::new(&store, &session);

                self.state = State::Ready {
                    config,
                    session,
                    store,
                    search: Search::new(),
                    roster,
                };

                task.map(Message::Roster)
            }
            Message::Search(message) => {
                let State::Ready {
                    session,
                    store,
                    search,
                    roster,
                    ..
                } = &mut self.state
                else {
                    return Task::none();
                };

                match search.update(message, session) {
                    search::Action::None => Task::none(),
                    search::Action::Run(task) => task.map(Message::Search),
                    search::Action::Add(pokemon) => {
                        roster.add(&pokemon, store, session).map(Message::Roster)
                    }
                }
            }
            Message::Roster(message) => {
                let State::Ready {
                    config,
                    store,
                    roster,
                    ..
                } = &mut self.state
                else {
                    return Task::none();
                };

                roster
                    .update(message, store, &config.export_dir())
                    .map(Message::Roster)
            }
            Message::Loaded(Err(error)) => {
                log::error!("{error}");
                self.state = State::Failed(error.to_string());

                Task::none()
            }
        }
    }

    fn view(&self) -> Element<'_, Message> {
        match &self.state {
            State::Loading => center(text("Loading...")).into(),
            State::Failed(error) => center(text!("Teamdex could not start: {error}")).into(),
            State::Ready {
                store,
                search,
                roster,
                ..
            } => {
                let search = container(scrollable(search.view().map(Message::Search)))
                    .width(Fill)
                    .height(Fill);

                let roster = container(roster.view(store).map(Message::Roster))
                    .max_width(420)
                    .height(Fill);

                column![logo(24), row![search, roster].spacing(30)]
                    .spacing(20)
                    .padding(20)
                    .into()
            }
        }
    }

    fn theme(&self) -> Theme {
        Theme::CatppuccinMocha
    }
}

async fn boot() -> Result<(Config, Session, Store), anywho::Error> {
    let config = Config::load().await;
    let session = config.session()?;
    let store = Store::load(Storage::new(config.data_dir())).await;

    Ok((config, session, store))
}
