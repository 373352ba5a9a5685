//! Charset replacement

use retromap_core::Charset;

use super::{CmdState, Command};
use crate::Model;

/// Replace the whole charset (e.g. after importing new tile art).
pub struct ReplaceCharsetCmd {
    charset: Charset,
    state: CmdState,
}

impl ReplaceCharsetCmd {
    pub fn new(charset: Charset) -> Self {
        Self {
            charset,
            state: CmdState::NotDone,
        }
    }

    fn swap(&mut self, model: &mut Model) {
        std::mem::swap(&mut model.proj_mut().charset, &mut self.charset);
        model.notify(|l, proj| l.charset_modified(proj));
    }
}

impl Command for ReplaceCharsetCmd {
    fn execute(&mut self, model: &mut Model) {
        self.swap(model);
        self.state = CmdState::Done;
    }

    fn undo(&mut self, model: &mut Model) {
        self.swap(model);
        self.state = CmdState::NotDone;
    }

    fn state(&self) -> CmdState {
        self.state
    }

    fn description(&self) -> &str {
        "Replace Charset"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;

    #[test]
    fn test_replace_charset() {
        let mut model = Model::default();
        let (rec, log) = recorder();
        model.add_listener(rec);
        let original = model.proj().charset.clone();
        let replacement = Charset::new(4, 4, 3);

        model.add_cmd(Box::new(ReplaceCharsetCmd::new(replacement.clone())));
        assert_eq!(model.proj().charset, replacement);
        model.undo();
        assert_eq!(model.proj().charset, original);
        model.redo();
        assert_eq!(model.proj().charset, replacement);
        assert_eq!(log.borrow().len(), 3);
        assert!(log.borrow().iter().all(|e| *e == Event::CharsetModified));
    }
}
