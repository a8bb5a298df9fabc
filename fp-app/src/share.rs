//! Share sheet boundary and the social bar's canned messages.

use crate::model::Alert;

/// Message sent through the share surface.
pub const SHARE_MESSAGE: &str = "Ponto de alimentacao para pets";

/// Platform share sheet. Fire-and-forget: the result is never observed.
pub trait ShareSurface {
    fn share(&self, message: &str);
}

/// Share the selected feeding point.
pub fn share_point(surface: &impl ShareSurface) {
    log::info!("sharing feeding point");
    surface.share(SHARE_MESSAGE);
}

/// Acknowledgement shown after the report button.
pub fn report_sent() -> Alert {
    Alert::new("Reporte enviado", "Obrigado pelo feedback.")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Recorder(RefCell<Vec<String>>);

    impl ShareSurface for Recorder {
        fn share(&self, message: &str) {
            self.0.borrow_mut().push(message.to_string());
        }
    }

    #[test]
    fn shares_canned_message() {
        let recorder = Recorder::default();
        share_point(&recorder);
        assert_eq!(*recorder.0.borrow(), vec![SHARE_MESSAGE.to_string()]);
    }

    #[test]
    fn report_alert_text() {
        let alert = report_sent();
        assert_eq!(alert.title, "Reporte enviado");
        assert_eq!(alert.message, "Obrigado pelo feedback.");
    }
}
