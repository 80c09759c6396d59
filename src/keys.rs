/// Keyboard shortcut registration and dispatch

use anyhow::{bail, Result};
use crossterm::event::{KeyCode, KeyModifiers};

use crate::screens::ViewId;

/// What a shortcut does. Actions are named rather than closures so the
/// dispatch site owns all side effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Quit,
    SwitchView(ViewId),
    SelectionUp,
    SelectionDown,
    OpenModal,
}

/// One key binding: label and key text feed the shortcut bar, the rest
/// drives dispatch. Immutable once created.
#[derive(Debug, Clone, Copy)]
pub struct KeyHandle {
    pub label: &'static str,
    pub key_text: &'static str,
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
    pub action: KeyAction,
    pub global: bool,
}

impl KeyHandle {
    pub const fn new(
        label: &'static str,
        key_text: &'static str,
        code: KeyCode,
        modifiers: KeyModifiers,
        action: KeyAction,
        global: bool,
    ) -> Self {
        Self {
            label,
            key_text,
            code,
            modifiers,
            action,
            global,
        }
    }
}

/// Binding table shared by global shortcuts and the active view's locals.
/// Duplicate registration within the same scope is a startup-time
/// programmer error; a cross-scope collision resolves local-first.
#[derive(Debug, Default)]
pub struct ShortcutTable {
    bindings: Vec<KeyHandle>,
}

impl ShortcutTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, handles: &[KeyHandle]) -> Result<()> {
        for handle in handles {
            if self
                .bindings
                .iter()
                .any(|b| b.code == handle.code && b.modifiers == handle.modifiers && b.global == handle.global)
            {
                bail!(
                    "duplicate key binding {:?}+{:?} ({})",
                    handle.modifiers,
                    handle.code,
                    handle.label
                );
            }
            if self
                .bindings
                .iter()
                .any(|b| b.code == handle.code && b.modifiers == handle.modifiers)
            {
                tracing::warn!(
                    label = handle.label,
                    "key binding shadows one from the other scope"
                );
            }
            self.bindings.push(*handle);
        }
        Ok(())
    }

    /// Remove exactly the bindings previously added for these handles.
    /// Unregistering a handle that was never registered is a no-op.
    pub fn unregister(&mut self, handles: &[KeyHandle]) {
        for handle in handles {
            if let Some(pos) = self.bindings.iter().position(|b| {
                b.code == handle.code && b.modifiers == handle.modifiers && b.global == handle.global
            }) {
                self.bindings.remove(pos);
            }
        }
    }

    /// Resolve a key event to an action, view-local bindings first.
    pub fn lookup(&self, code: KeyCode, modifiers: KeyModifiers) -> Option<KeyAction> {
        self.bindings
            .iter()
            .filter(|b| b.code == code && b.modifiers == modifiers)
            .min_by_key(|b| b.global)
            .map(|b| b.action)
    }

    pub fn handles(&self) -> &[KeyHandle] {
        &self.bindings
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn global(code: KeyCode, action: KeyAction) -> KeyHandle {
        KeyHandle::new("g", "G", code, KeyModifiers::ALT, action, true)
    }

    fn local(code: KeyCode, action: KeyAction) -> KeyHandle {
        KeyHandle::new("l", "L", code, KeyModifiers::NONE, action, false)
    }

    #[test]
    fn register_then_unregister_restores_table() {
        let mut table = ShortcutTable::new();
        table
            .register(&[global(KeyCode::Char('1'), KeyAction::SwitchView(ViewId::Channels))])
            .unwrap();
        let before = table.len();

        let locals = [
            local(KeyCode::Up, KeyAction::SelectionUp),
            local(KeyCode::Down, KeyAction::SelectionDown),
        ];
        table.register(&locals).unwrap();
        assert_eq!(table.len(), before + 2);
        table.unregister(&locals);
        assert_eq!(table.len(), before);
        assert_eq!(
            table.lookup(KeyCode::Char('1'), KeyModifiers::ALT),
            Some(KeyAction::SwitchView(ViewId::Channels))
        );
        assert_eq!(table.lookup(KeyCode::Up, KeyModifiers::NONE), None);
    }

    #[test]
    fn duplicate_registration_fails() {
        let mut table = ShortcutTable::new();
        let h = local(KeyCode::Up, KeyAction::SelectionUp);
        table.register(&[h]).unwrap();
        assert!(table.register(&[h]).is_err());
    }

    #[test]
    fn unregister_unknown_is_noop() {
        let mut table = ShortcutTable::new();
        table
            .register(&[local(KeyCode::Up, KeyAction::SelectionUp)])
            .unwrap();
        table.unregister(&[local(KeyCode::Down, KeyAction::SelectionDown)]);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn local_binding_takes_precedence_over_global() {
        let mut table = ShortcutTable::new();
        table
            .register(&[KeyHandle::new(
                "switch",
                "N",
                KeyCode::Char('n'),
                KeyModifiers::ALT,
                KeyAction::SwitchView(ViewId::Peers),
                true,
            )])
            .unwrap();
        table
            .register(&[KeyHandle::new(
                "modal",
                "N",
                KeyCode::Char('n'),
                KeyModifiers::ALT,
                KeyAction::OpenModal,
                false,
            )])
            .unwrap();
        assert_eq!(
            table.lookup(KeyCode::Char('n'), KeyModifiers::ALT),
            Some(KeyAction::OpenModal)
        );
    }

    #[test]
    fn view_switch_swaps_exactly_the_local_set() {
        let mut table = ShortcutTable::new();
        let globals = [
            global(KeyCode::Char('1'), KeyAction::SwitchView(ViewId::Channels)),
            global(KeyCode::Char('2'), KeyAction::SwitchView(ViewId::Peers)),
        ];
        table.register(&globals).unwrap();

        let outgoing = [local(KeyCode::Up, KeyAction::SelectionUp)];
        let incoming = [
            local(KeyCode::Up, KeyAction::SelectionUp),
            local(KeyCode::Char('n'), KeyAction::OpenModal),
        ];
        table.register(&outgoing).unwrap();

        table.unregister(&outgoing);
        table.register(&incoming).unwrap();

        assert_eq!(table.len(), globals.len() + incoming.len());
        assert_eq!(
            table.lookup(KeyCode::Char('2'), KeyModifiers::ALT),
            Some(KeyAction::SwitchView(ViewId::Peers))
        );
        assert_eq!(
            table.lookup(KeyCode::Char('n'), KeyModifiers::NONE),
            Some(KeyAction::OpenModal)
        );
    }
}
