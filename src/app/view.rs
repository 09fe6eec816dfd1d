use super::messages::Message;
use super::state::App;
use iced::alignment::{Horizontal, Vertical};
use iced::widget::{
    Column, Row, Space, column, container, image, mouse_area, progress_bar, row, stack, text,
};
use iced::{Color, ContentFit, Element, Length, Padding};
use reel_core::{Flag, Property, SECTION_COUNT, Target, Timeline};

/// Height of one heading line; word offsets are percentages of this.
const WORD_LINE_PX: f32 = 96.0;
const HEADING_SIZE: f32 = 72.0;
const LIST_SIZE: f32 = 18.0;
/// Text alpha multiplier while the epilogue blurs the chrome.
const BLURRED_ALPHA: f32 = 0.35;

impl App {
    pub fn view(&self) -> Element<'_, Message> {
        let timeline = self.player.timeline();
        let stage_height = self.viewport_height
            * timeline.value(Target::PinnedContainer, Property::HeightPct)
            / 100.0;
        let chrome_alpha = if timeline.flag(Target::Chrome, Flag::Blurred) {
            BLURRED_ALPHA
        } else {
            1.0
        };

        let stage = stack![
            self.backgrounds(timeline),
            column![
                shifted(self.header(chrome_alpha), timeline.value(Target::Header, Property::OffsetY)),
                shifted(self.content(timeline, chrome_alpha), timeline.value(Target::Content, Property::OffsetY))
                    .height(Length::Fill),
                shifted(self.footer(chrome_alpha), timeline.value(Target::Footer, Property::OffsetY)),
            ]
            .padding(32)
            .height(Length::Fill),
        ]
        .width(Length::Fill)
        .height(Length::Fill);

        column![
            container(stage)
                .width(Length::Fill)
                .height(Length::Fixed(stage_height.max(0.0)))
                .clip(true),
            container(text("The End").size(HEADING_SIZE))
                .center_x(Length::Fill)
                .center_y(Length::Fill),
        ]
        .height(Length::Fill)
        .into()
    }

    fn backgrounds(&self, timeline: &Timeline) -> Element<'_, Message> {
        let slideshow = self.player.slideshow();
        let deck = slideshow.deck();
        let layers = slideshow.paint_order().into_iter().filter_map(|index| {
            let target = Target::Background(index);
            let opacity = timeline.value(target, Property::Opacity);
            if opacity <= 0.0 {
                return None;
            }
            let section = deck.get(index)?;
            let picture = image(image::Handle::from_path(self.config.asset_path(&section.background)))
                .content_fit(ContentFit::Cover)
                .width(Length::Fill)
                .height(Length::Fill)
                .opacity(opacity);
            let clip_top = timeline.value(target, Property::ClipTop).clamp(0.0, 100.0);
            let clip_bottom = timeline.value(target, Property::ClipBottom).clamp(0.0, 100.0);
            let drift = timeline.value(target, Property::YPercent) / 100.0 * self.viewport_height;
            Some(shifted(wiped(picture.into(), clip_top, clip_bottom), drift).into())
        });
        stack(layers).width(Length::Fill).height(Length::Fill).into()
    }

    fn header(&self, alpha: f32) -> Element<'_, Message> {
        let label = self.player.progress_label();
        row![
            text(format!("{label} / {SECTION_COUNT:02}")).color(faded(alpha)),
            container(progress_bar(0.0..=1.0, self.player.progress_fill()).height(4))
                .width(Length::Fixed(240.0))
                .center_y(Length::Shrink),
        ]
        .spacing(16)
        .align_y(Vertical::Center)
        .into()
    }

    fn content(&self, timeline: &Timeline, alpha: f32) -> Element<'_, Message> {
        let deck = self.player.slideshow().deck();
        let left = Column::with_children((0..SECTION_COUNT).map(|index| {
            let label = deck.get(index).map(|s| s.left_label.as_str()).unwrap_or_default();
            list_item(label, index, timeline.value(Target::LeftItem(index), Property::Opacity) * alpha)
        }))
        .spacing(6);
        let right = Column::with_children((0..SECTION_COUNT).map(|index| {
            let label = deck.get(index).map(|s| s.right_label.as_str()).unwrap_or_default();
            list_item(label, index, timeline.value(Target::RightItem(index), Property::Opacity) * alpha)
        }))
        .spacing(6)
        .align_x(Horizontal::Right);

        row![
            container(left).width(Length::FillPortion(1)).center_y(Length::Fill),
            container(self.featured(timeline, alpha))
                .center_x(Length::FillPortion(3))
                .center_y(Length::Fill),
            container(right)
                .width(Length::FillPortion(1))
                .align_x(Horizontal::Right)
                .center_y(Length::Fill),
        ]
        .height(Length::Fill)
        .into()
    }

    fn featured(&self, timeline: &Timeline, alpha: f32) -> Element<'_, Message> {
        let slideshow = self.player.slideshow();
        let layers = (0..SECTION_COUNT).filter_map(|section| {
            let target = Target::Featured(section);
            if !timeline.flag(target, Flag::Visible) {
                return None;
            }
            let section_alpha = timeline.value(target, Property::Opacity) * alpha;
            let words = slideshow.words(section)?;
            let line = Row::with_children(words.iter().map(|word| {
                let word_target = Target::Word {
                    section,
                    word: word.index,
                };
                let opacity = timeline.value(word_target, Property::Opacity) * section_alpha;
                let offset = timeline.value(word_target, Property::YPercent) / 100.0 * WORD_LINE_PX;
                container(shifted(
                    text(word.text.as_str()).size(HEADING_SIZE).color(faded(opacity)).into(),
                    offset,
                ))
                .height(Length::Fixed(WORD_LINE_PX))
                .clip(true)
                .into()
            }))
            .spacing(HEADING_SIZE * 0.3);
            Some(container(line).center_x(Length::Fill).center_y(Length::Fill).into())
        });
        stack(layers).width(Length::Fill).height(Length::Fill).into()
    }

    fn footer(&self, alpha: f32) -> Element<'_, Message> {
        container(text("Scroll to explore").size(LIST_SIZE).color(faded(alpha)))
            .center_x(Length::Fill)
            .into()
    }
}

fn list_item(label: &str, index: usize, opacity: f32) -> Element<'_, Message> {
    mouse_area(text(label).size(LIST_SIZE).color(faded(opacity)))
        .on_press(Message::ItemClicked(index))
        .on_enter(Message::ItemHovered(index))
        .into()
}

fn faded(alpha: f32) -> Color {
    Color {
        a: alpha.clamp(0.0, 1.0),
        ..Color::WHITE
    }
}

/// Move `content` vertically by `offset_px`, clipping what leaves its box.
fn shifted(content: Element<'_, Message>, offset_px: f32) -> container::Container<'_, Message> {
    let (padding, align) = if offset_px >= 0.0 {
        (
            Padding {
                top: offset_px,
                ..Padding::ZERO
            },
            Vertical::Top,
        )
    } else {
        (
            Padding {
                bottom: -offset_px,
                ..Padding::ZERO
            },
            Vertical::Bottom,
        )
    };
    container(container(content).padding(padding))
        .align_y(align)
        .width(Length::Fill)
        .clip(true)
}

/// Hide the top `clip_top` and bottom `clip_bottom` percent of `content`.
fn wiped(content: Element<'_, Message>, clip_top: f32, clip_bottom: f32) -> Element<'_, Message> {
    let shown = (100.0 - clip_top - clip_bottom).max(0.0);
    if shown <= 0.0 {
        return Space::new(Length::Fill, Length::Fill).into();
    }
    let portion = |pct: f32| (pct * 10.0).round() as u16;
    let mut layers = Column::new().width(Length::Fill).height(Length::Fill);
    if clip_top > 0.0 {
        layers = layers.push(Space::new(Length::Fill, Length::FillPortion(portion(clip_top).max(1))));
    }
    layers = layers.push(
        container(content)
            .width(Length::Fill)
            .height(Length::FillPortion(portion(shown).max(1)))
            .clip(true),
    );
    if clip_bottom > 0.0 {
        layers = layers.push(Space::new(Length::Fill, Length::FillPortion(portion(clip_bottom).max(1))));
    }
    layers.into()
}
