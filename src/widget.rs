use crate::pokedex::display::{self, Badge};
use crate::pokedex::pokemon::{Stat, Type};

use iced::border;
use iced::widget::{container, progress_bar, row, text};
use iced::{Center, Color, Element, Pixels};

pub fn logo<'a, Message>(size: impl Into<Pixels>) -> Element<'a, Message> {
    text(display::capitalize(env!("CARGO_PKG_NAME")))
        .size(size)
        .into()
}

pub fn badge<'a, Message: 'a>(type_: &Type) -> Element<'a, Message> {
    let (background, foreground) = colors(Badge::for_type(type_.as_str()));

    container(text(type_.as_str().to_owned()).size(12))
        .padding([2, 8])
        .style(move |_theme| container::Style {
            text_color: Some(foreground),
            ..container::Style::default()
                .background(background)
                .border(border::rounded(8))
        })
        .into()
}

pub fn badges<'a, Message: 'a>(types: &[Type]) -> Element<'a, Message> {
    row(types.iter().map(badge)).spacing(5).into()
}

pub fn stat<'a, Message: 'a>(stat: &Stat) -> Element<'a, Message> {
    row![
        text(stat.name.clone()).size(12).width(110),
        progress_bar(
            0.0..=1.0,
            display::stat_bar(stat.value, display::STAT_BAR_MAX)
        ),
        // The raw value is shown even when the bar is clamped
        text!("{}", stat.value).size(12).width(36),
    ]
    .spacing(10)
    .align_y(Center)
    .into()
}

fn colors(badge: Badge) -> (Color, Color) {
    match badge {
        Badge::Primary => (Color::from_rgb8(0x0d, 0x6e, 0xfd), Color::WHITE),
        Badge::Secondary => (Color::from_rgb8(0x6c, 0x75, 0x7d), Color::WHITE),
        Badge::Success => (Color::from_rgb8(0x19, 0x87, 0x54), Color::WHITE),
        Badge::Danger => (Color::from_rgb8(0xdc, 0x35, 0x45), Color::WHITE),
        Badge::Warning => (Color::from_rgb8(0xff, 0xc1, 0x07), Color::BLACK),
        Badge::Info => (Color::from_rgb8(0x0d, 0xca, 0xf0), Color::BLACK),
        Badge::Light => (Color::from_rgb8(0xf8, 0xf9, 0xfa), Color::BLACK),
        Badge::Dark => (Color::from_rgb8(0x21, 0x25, 0x29), Color::WHITE),
    }
}
