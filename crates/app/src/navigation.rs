//! Named screens and the acknowledgement dialogs shown after actions.
//!
//! The library never navigates by itself. Outcomes carry an [`Alert`] whose
//! actions name where a front end may go next.

use core::fmt;

/// A screen reachable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Destination {
    /// The one-pet-at-a-time browser (initial screen).
    #[default]
    Home,
    /// The add-pet form.
    AddNewPet,
    /// The cart.
    Cart,
}

impl Destination {
    /// Route name used by front ends.
    #[must_use]
    pub const fn route_name(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::AddNewPet => "AddNewPet",
            Self::Cart => "Cart",
        }
    }

    /// Look up a destination by route name.
    #[must_use]
    pub fn from_route_name(name: &str) -> Option<Self> {
        [Self::Home, Self::AddNewPet, Self::Cart]
            .into_iter()
            .find(|d| d.route_name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.route_name())
    }
}

/// A follow-up offered in an [`Alert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlertAction {
    /// Reset the add-pet form and stay on it.
    AddAnother,
    /// Leave the form for the pet browser.
    ViewPets,
    /// Dismiss and stay on the pet browser.
    ContinueShopping,
    /// Open the cart.
    ViewCart,
    /// Open the add-pet form.
    AddPet,
    /// Return from the empty cart to the pet browser.
    BrowsePets,
    /// Dismiss.
    Ok,
}

impl AlertAction {
    /// Button label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::AddAnother => "Add Another",
            Self::ViewPets => "View Pets",
            Self::ContinueShopping => "Continue Shopping",
            Self::ViewCart => "View Cart",
            Self::AddPet => "Add Pet",
            Self::BrowsePets => "Browse Pets",
            Self::Ok => "OK",
        }
    }

    /// The screen this action leads to, if it navigates.
    #[must_use]
    pub const fn destination(self) -> Option<Destination> {
        match self {
            Self::ViewPets | Self::BrowsePets => Some(Destination::Home),
            Self::ViewCart => Some(Destination::Cart),
            Self::AddPet => Some(Destination::AddNewPet),
            Self::AddAnother | Self::ContinueShopping | Self::Ok => None,
        }
    }
}

/// A titled message with follow-up actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
    pub actions: Vec<AlertAction>,
}

impl Alert {
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        message: impl Into<String>,
        actions: impl Into<Vec<AlertAction>>,
    ) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            actions: actions.into(),
        }
    }
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.message)?;
        if !self.actions.is_empty() {
            let labels: Vec<_> = self.actions.iter().map(|a| a.label()).collect();
            write!(f, " [{}]", labels.join(" | "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_names_round_trip() {
        for d in [Destination::Home, Destination::AddNewPet, Destination::Cart] {
            assert_eq!(Destination::from_route_name(d.route_name()), Some(d));
        }
        assert_eq!(Destination::from_route_name("cart"), Some(Destination::Cart));
        assert_eq!(Destination::from_route_name("Checkout"), None);
        assert_eq!(Destination::default(), Destination::Home);
    }

    #[test]
    fn test_action_destinations() {
        assert_eq!(AlertAction::ViewPets.destination(), Some(Destination::Home));
        assert_eq!(AlertAction::ViewCart.destination(), Some(Destination::Cart));
        assert_eq!(AlertAction::AddAnother.destination(), None);
    }

    #[test]
    fn test_alert_display() {
        let alert = Alert::new(
            "Success!",
            "Buddy has been added successfully!",
            [AlertAction::AddAnother, AlertAction::ViewPets],
        );
        assert_eq!(
            alert.to_string(),
            "Success!: Buddy has been added successfully! [Add Another | View Pets]"
        );
    }
}
