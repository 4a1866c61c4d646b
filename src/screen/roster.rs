use crate::pokedex::display;
use crate::pokedex::pokemon;
use crate::pokedex::team::{self, Member, Slot, Store, Team};
use crate::pokedex::{Error, Pokemon, Session};
use crate::sprite::Sprite;
use crate::widget;

use iced::widget::space::horizontal as horizontal_space;
use iced::widget::{button, column, container, image, row, text};
use iced::{Center, Element, Fill, Task, Theme};

use function::Binary;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// The slots of the team, plus its bulk actions.
pub struct Roster {
    sprites: HashMap<String, Image>,
    notice: Option<String>,
}

enum Image {
    Loading,
    Loaded(image::Handle),
    Missing,
}

#[derive(Debug, Clone)]
pub enum Message {
    Remove(pokemon::Id),
    Clear,
    Export,
    Saved(Result<(), Error>),
    Exported(Result<PathBuf, Error>),
    SpriteFetched(String, Result<Sprite, anywho::Error>),
}

impl Roster {
    pub fn new(store: &Store, session: &Session) -> (Self, Task<Message>) {
        let mut roster = Self {
            sprites: HashMap::new(),
            notice: store
                .is_degraded()
                .then(|| "Your saved team could not be read and was reset.".to_owned()),
        };

        let fetch_sprites = roster.fetch_sprites(store, session);

        (roster, fetch_sprites)
    }

    pub fn update(
        &mut self,
        message: Message,
        store: &mut Store,
        export_dir: &Path,
    ) -> Task<Message> {
        match message {
            Message::Remove(id) => {
                self.notice = Some("Removed from team.".to_owned());

                let save = store.remove(id);
                self.forget_sprites(store.team());

                Task::perform(save, Message::Saved)
            }
            Message::Clear => {
                self.notice = Some("Team cleared.".to_owned());

                let save = store.clear();
                self.forget_sprites(store.team());

                Task::perform(save, Message::Saved)
            }
            Message::Export => Task::perform(store.export(export_dir), Message::Exported),
            Message::Saved(Ok(())) => Task::none(),
            Message::Exported(Ok(path)) => {
                self.notice = Some(format!("Team exported to {}", path.display()));

                Task::none()
            }
            Message::SpriteFetched(url, Ok(sprite)) => {
                // Members removed while loading no longer have an entry
                if let Some(image) = self.sprites.get_mut(&url) {
                    *image = Image::Loaded(image::Handle::from_rgba(
                        sprite.width,
                        sprite.height,
                        sprite.rgba,
                    ));
                }

                Task::none()
            }
            Message::Saved(Err(error)) => {
                // The team in memory stays authoritative
                log::error!("{error}");

                Task::none()
            }
            Message::Exported(Err(error)) => {
                log::error!("{error}");
                self.notice = Some(display::capitalize(&error.to_string()));

                Task::none()
            }
            Message::SpriteFetched(url, Err(error)) => {
                log::error!("{error}");

                if let Some(image) = self.sprites.get_mut(&url) {
                    *image = Image::Missing;
                }

                Task::none()
            }
        }
    }

    pub fn add(&mut self, pokemon: &Pokemon, store: &mut Store, session: &Session) -> Task<Message> {
        match store.add(pokemon) {
            Ok(save) => {
                self.notice = Some(format!(
                    "{} added to team!",
                    display::capitalize(&pokemon.name)
                ));

                Task::batch([
                    Task::perform(save, Message::Saved),
                    self.fetch_sprites(store, session),
                ])
            }
            Err(error) => {
                log::info!("{error}");
                self.notice = Some(display::capitalize(&error.to_string()));

                Task::none()
            }
        }
    }

    fn fetch_sprites(&mut self, store: &Store, session: &Session) -> Task<Message> {
        let mut tasks = Vec::new();

        for member in store.team().members() {
            if self.sprites.contains_key(&member.sprite) {
                continue;
            }

            let _ = self.sprites.insert(member.sprite.clone(), Image::Loading);

            tasks.push(Task::perform(
                Sprite::fetch(&member.sprite, session),
                Message::SpriteFetched.with(member.sprite.clone()),
            ));
        }

        Task::batch(tasks)
    }

    fn forget_sprites(&mut self, team: &Team) {
        self.sprites
            .retain(|url, _| team.members().iter().any(|member| &member.sprite == url));
    }

    pub fn view<'a>(&'a self, store: &'a Store) -> Element<'a, Message> {
        let team = store.team();

        let header = row![
            text!("Team ({}/{})", team.len(), team::CAPACITY).size(20),
            horizontal_space(),
            button("Export JSON")
                .style(button::secondary)
                .on_press(Message::Export),
            button("Clear team")
                .style(button::danger)
                .on_press_maybe((!team.is_empty()).then_some(Message::Clear)),
        ]
        .spacing(10)
        .align_y(Center);

        let slots = column(team.slots().map(|slot| match slot {
            Slot::Filled(member) => self.member(member),
            Slot::Empty(index) => empty(index),
        }))
        .spacing(8);

        column![header, slots]
            .push(self.notice.as_deref().map(|notice| text(notice).size(14)))
            .spacing(15)
            .into()
    }

    fn member<'a>(&'a self, member: &'a Member) -> Element<'a, Message> {
        let sprite: Element<'_, _> = match self.sprites.get(&member.sprite) {
            Some(Image::Loaded(handle)) => image(handle).width(48).height(48).into(),
            _ => horizontal_space().width(48).into(),
        };

        slot(
            row![
                sprite,
                column![
                    text(display::capitalize(&member.name)).size(16),
                    widget::badges(&member.types),
                ]
                .spacing(5),
                horizontal_space(),
                button("Remove")
                    .style(button::danger)
                    .on_press(Message::Remove(member.id)),
            ]
            .spacing(10)
            .align_y(Center),
        )
    }
}

fn empty<'a>(index: usize) -> Element<'a, Message> {
    slot(
        row![
            text(display::placeholder(index).unwrap_or_default())
                .size(14)
                .style(|theme: &Theme| {
                    let palette = theme.extended_palette();

                    text::Style {
                        color: Some(palette.background.strong.color),
                    }
                }),
            horizontal_space(),
            text("—"),
        ]
        .align_y(Center)
        .height(48),
    )
}

fn slot<'a>(content: impl Into<Element<'a, Message>>) -> Element<'a, Message> {
    container(content)
        .padding(10)
        .width(Fill)
        .style(container::bordered_box)
        .into()
}
