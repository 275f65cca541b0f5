//! Sizing policies and the axis resolution used by the measure pass

/// How one axis of a widget's size is determined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SizeConstraint {
    /// Exactly `value` pixels
    Fixed,
    /// All of the available extent
    Fill,
    /// Whatever the widget's content measures, plus padding
    #[default]
    Content,
    /// `value` percent of the available extent
    Percent,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SizeSpec {
    pub constraint: SizeConstraint,
    /// Used by Fixed and Percent
    pub value: f32,
}

impl SizeSpec {
    pub const fn fixed(v: f32) -> Self {
        Self { constraint: SizeConstraint::Fixed, value: v }
    }

    pub const fn fill() -> Self {
        Self { constraint: SizeConstraint::Fill, value: 0.0 }
    }

    pub const fn content() -> Self {
        Self { constraint: SizeConstraint::Content, value: 0.0 }
    }

    /// Percent values are not validated; 150% simply yields 1.5x
    pub const fn percent(v: f32) -> Self {
        Self { constraint: SizeConstraint::Percent, value: v }
    }

    pub fn is_content(&self) -> bool {
        self.constraint == SizeConstraint::Content
    }

    /// Resolve this spec against the available extent. `content` is only
    /// invoked for Content specs and must already include padding.
    pub fn resolve(&self, available: f32, content: impl FnOnce() -> f32) -> f32 {
        match self.constraint {
            SizeConstraint::Fixed => self.value,
            SizeConstraint::Fill => available,
            SizeConstraint::Percent => available * (self.value / 100.0),
            SizeConstraint::Content => content(),
        }
    }
}

impl From<f32> for SizeSpec {
    fn from(v: f32) -> Self {
        SizeSpec::fixed(v)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Start,
    Center,
    End,
    Stretch,
}

impl Alignment {
    /// Offset of an item of `item` extent inside `space`. Stretch behaves
    /// like Start for positioning.
    pub fn offset(self, space: f32, item: f32) -> f32 {
        match self {
            Alignment::Center => (space - item) / 2.0,
            Alignment::End => space - item,
            Alignment::Start | Alignment::Stretch => 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Horizontal,
    Vertical,
}
