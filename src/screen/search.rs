use crate::pokedex::display;
use crate::pokedex::lookup::{self, Ticket};
use crate::pokedex::{Error, Pokemon, Query, Session};
use crate::sprite::Sprite;
use crate::widget;

use iced::task;
use iced::widget::space::horizontal as horizontal_space;
use iced::widget::{
    button, center, column, container, image, row, text, text_input,
};
use iced::{Center, Element, Fill, Task};

use function::Binary;

/// Lookup form and the details of the current catalog entry.
pub struct Search {
    query: String,
    tracker: lookup::Tracker,
    task: Option<task::Handle>,
    state: State,
}

enum State {
    Idle,
    Loading,
    Found {
        pokemon: Pokemon,
        moves: Vec<String>,
        sprite: Image,
    },
    Failed(String),
}

enum Image {
    Loading,
    Loaded(image::Handle),
    Missing,
}

#[derive(Debug, Clone)]
pub enum Message {
    QueryChanged(String),
    Submit,
    Random,
    Clear,
    Reshuffle,
    Add,
    Found(Ticket, Result<Pokemon, Error>),
    SpriteFetched(Ticket, Result<Sprite, anywho::Error>),
}

pub enum Action {
    None,
    Run(Task<Message>),
    Add(Pokemon),
}

impl Search {
    pub fn new() -> Self {
        Self {
            query: String::new(),
            tracker: lookup::Tracker::new(),
            task: None,
            state: State::Idle,
        }
    }

    pub fn update(&mut self, message: Message, session: &Session) -> Action {
        match message {
            Message::QueryChanged(query) => {
                self.query = query;

                Action::None
            }
            Message::Submit => match Query::parse(&self.query) {
                Some(query) => self.lookup(query, session),
                None => {
                    self.state = State::Failed(Error::InvalidInput.to_string());

                    Action::None
                }
            },
            Message::Random => self.lookup(Query::random(), session),
            Message::Clear => {
                self.tracker.cancel();
                self.task = None;
                self.query.clear();
                self.state = State::Idle;

                Action::None
            }
            Message::Reshuffle => {
                if let State::Found { pokemon, moves, .. } = &mut self.state {
                    *moves = pokemon.moves.sample(display::MOVE_SAMPLE);
                }

                Action::None
            }
            Message::Add => {
                let State::Found { pokemon, .. } = &self.state else {
                    return Action::None;
                };

                Action::Add(pokemon.clone())
            }
            Message::Found(ticket, result) => {
                let Some(result) = self.tracker.settle(ticket, result) else {
                    return Action::None;
                };

                self.task = None;

                match result {
                    Ok(pokemon) => {
                        log::info!("{} loaded!", display::capitalize(&pokemon.name));

                        let fetch_sprite = Task::perform(
                            Sprite::fetch(&pokemon.sprite, session),
                            Message::SpriteFetched.with(ticket),
                        );

                        self.state = State::Found {
                            moves: pokemon.moves.sample(display::MOVE_SAMPLE),
                            pokemon,
                            sprite: Image::Loading,
                        };

                        Action::Run(fetch_sprite)
                    }
                    Err(error) => {
                        log::warn!("{error}");
                        self.state = State::Failed(error.to_string());

                        Action::None
                    }
                }
            }
            Message::SpriteFetched(ticket, result) => {
                if !self.tracker.is_latest(ticket) {
                    return Action::None;
                }

                if let State::Found { sprite, .. } = &mut self.state {
                    *sprite = match result {
                        Ok(loaded) => Image::Loaded(image::Handle::from_rgba(
                            loaded.width,
                            loaded.height,
                            loaded.rgba,
                        )),
                        Err(error) => {
                            log::error!("{error}");

                            Image::Missing
                        }
                    };
                }

                Action::None
            }
        }
    }

    fn lookup(&mut self, query: Query, session: &Session) -> Action {
        let ticket = self.tracker.begin();
        let session = session.clone();

        let (lookup, handle) = Task::perform(
            async move { session.fetch(&query).await },
            Message::Found.with(ticket),
        )
        .abortable();

        // Dropping the previous handle aborts its request
        self.task = Some(handle.abort_on_drop());
        self.state = State::Loading;

        Action::Run(lookup)
    }

    pub fn view(&self) -> Element<'_, Message> {
        let is_loading = matches!(self.state, State::Loading);

        let input = text_input("Name or ID (e.g. pikachu or 25)", &self.query)
            .on_input(Message::QueryChanged)
            .on_submit(Message::Submit)
            .padding(10);

        let controls = row![
            input,
            button("Search")
                .padding([10, 15])
                .on_press_maybe((!is_loading).then_some(Message::Submit)),
            button("Random")
                .padding([10, 15])
                .style(button::secondary)
                .on_press_maybe((!is_loading).then_some(Message::Random)),
        ]
        .spacing(10);

        let content: Element<'_, _> = match &self.state {
            State::Idle => center(text("Search for a Pokémon to see its details.")).into(),
            State::Loading => center(text("Loading...")).into(),
            State::Failed(error) => container(text(error.as_str()))
                .padding(10)
                .width(Fill)
                .style(container::bordered_box)
                .into(),
            State::Found {
                pokemon,
                moves,
                sprite,
            } => details(pokemon, moves, sprite),
        };

        column![controls, content].spacing(20).into()
    }
}

impl Default for Search {
    fn default() -> Self {
        Self::new()
    }
}

fn details<'a>(
    pokemon: &'a Pokemon,
    moves: &'a [String],
    sprite: &'a Image,
) -> Element<'a, Message> {
    let sprite: Element<'_, _> = match sprite {
        Image::Loaded(handle) => image(handle).width(120).height(120).into(),
        Image::Loading => container(text("...")).center(120).into(),
        Image::Missing => container(text("No artwork")).center(120).into(),
    };

    let header = row![
        sprite,
        column![
            row![
                text(display::capitalize(&pokemon.name)).size(28),
                text!("#{}", pokemon.id).size(16),
            ]
            .spacing(10)
            .align_y(Center),
            widget::badges(&pokemon.types),
            text!("Height: {} m", pokemon.height).size(14),
            text!("Weight: {} kg", pokemon.weight).size(14),
        ]
        .spacing(8),
    ]
    .spacing(20)
    .align_y(Center);

    let stats = column(pokemon.stats.iter().map(widget::stat)).spacing(5);

    let moves: Element<'_, _> = if moves.is_empty() {
        text("No moves found.").into()
    } else {
        column(moves.iter().map(|name| text!("• {name}").size(14).into()))
            .spacing(4)
            .into()
    };

    let actions = row![
        button("Add to team").on_press(Message::Add),
        button("Reshuffle moves")
            .style(button::secondary)
            .on_press(Message::Reshuffle),
        horizontal_space(),
        button("Clear").style(button::text).on_press(Message::Clear),
    ]
    .spacing(10);

    container(
        column![
            header,
            text("Stats").size(18),
            stats,
            text("Moves").size(18),
            moves,
            actions
        ]
        .spacing(15),
    )
    .padding(20)
    .width(Fill)
    .style(container::bordered_box)
    .into()
}
