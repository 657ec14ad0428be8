//! Popup content shown for a marker.

use crate::Pin;

/// Text content of a marker popup.
///
/// Holds the lines shown when a marker is selected: the pin name, its author,
/// and a reference to the uploaded image when the pin has one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinPopup {
    /// Pin name, rendered as the popup title
    pub title: String,
    /// `Added by: <author>` line
    pub author_line: String,
    /// `Image: <url>` line, present only when the pin has an image
    pub image_line: Option<String>,
}

impl PinPopup {
    /// Builds the popup content for a pin.
    pub fn for_pin(pin: &Pin) -> Self {
        Self {
            title: pin.name.clone(),
            author_line: format!("Added by: {}", pin.author),
            image_line: pin
                .image_url
                .as_ref()
                .filter(|url| !url.is_empty())
                .map(|url| format!("Image: {url}")),
        }
    }

    /// All popup lines in display order.
    pub fn lines(&self) -> Vec<&str> {
        let mut lines = vec![self.title.as_str(), self.author_line.as_str()];
        if let Some(image_line) = &self.image_line {
            lines.push(image_line);
        }
        lines
    }

    /// Widest line in characters, used to size the popup box.
    pub fn width(&self) -> usize {
        self.lines()
            .iter()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pin(image_url: Option<&str>) -> Pin {
        Pin {
            name: "Mahabodhi Temple".to_owned(),
            lat: 24.6959,
            lng: 84.9913,
            author: "asha".to_owned(),
            image_url: image_url.map(str::to_owned),
        }
    }

    #[test]
    fn test_popup_without_image() {
        let popup = PinPopup::for_pin(&pin(None));
        assert_eq!(popup.title, "Mahabodhi Temple");
        assert_eq!(popup.author_line, "Added by: asha");
        assert_eq!(popup.image_line, None);
        assert_eq!(popup.lines().len(), 2);
    }

    #[test]
    fn test_popup_with_image() {
        let popup = PinPopup::for_pin(&pin(Some("/static/uploads/temple.jpg")));
        assert_eq!(
            popup.image_line.as_deref(),
            Some("Image: /static/uploads/temple.jpg")
        );
        assert_eq!(popup.lines().len(), 3);
        assert_eq!(popup.width(), "Image: /static/uploads/temple.jpg".len());
    }

    #[test]
    fn test_popup_empty_image_url_is_ignored() {
        let popup = PinPopup::for_pin(&pin(Some("")));
        assert_eq!(popup.image_line, None);
    }
}
