// src/common/i18n.rs

use std::{collections::HashMap, sync::Arc};

pub const DEFAULT_LANG: &str = "pt";

const PT: &[(&str, &str)] = &[
    ("validation", "Um ou mais campos são inválidos."),
    ("validation.required", "Campo obrigatório."),
    ("validation.range", "Valor fora do intervalo permitido."),
    ("item_not_found", "Item {id} não encontrado."),
    ("unknown_field", "Campo '{field}' não pertence a nenhuma versão (1 a 6)."),
    ("paginacao_inactive", "Ative a paginação antes de definir o path do trabalho."),
    ("internal", "Ocorreu um erro inesperado."),
];

const EN: &[(&str, &str)] = &[
    ("validation", "One or more fields are invalid."),
    ("validation.required", "This field is required."),
    ("validation.range", "Value out of the allowed range."),
    ("item_not_found", "Item {id} not found."),
    ("unknown_field", "Field '{field}' is not a round field (1 to 6)."),
    ("paginacao_inactive", "Enable pagination before setting the work path."),
    ("internal", "An unexpected error occurred."),
];

/// Mensagens de erro por idioma. Cai para o português e, por fim, para a própria chave.
#[derive(Clone)]
pub struct I18nStore {
    messages: Arc<HashMap<&'static str, HashMap<&'static str, &'static str>>>,
}

impl I18nStore {
    pub fn new() -> Self {
        let mut messages = HashMap::new();
        messages.insert("pt", PT.iter().copied().collect());
        messages.insert("en", EN.iter().copied().collect());
        Self { messages: Arc::new(messages) }
    }

    pub fn translate(&self, lang: &str, key: &str, args: &[(&str, &str)]) -> String {
        let template = self
            .lookup(lang, key)
            .or_else(|| self.lookup(DEFAULT_LANG, key))
            .unwrap_or(key);

        args.iter().fold(template.to_string(), |msg, (name, value)| {
            msg.replace(&format!("{{{name}}}"), value)
        })
    }

    fn lookup(&self, lang: &str, key: &str) -> Option<&'static str> {
        self.messages.get(lang).and_then(|table| table.get(key)).copied()
    }
}

impl Default for I18nStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_to_portuguese_then_key() {
        let store = I18nStore::new();
        assert_eq!(store.translate("fr", "internal", &[]), "Ocorreu um erro inesperado.");
        assert_eq!(store.translate("en", "sem.chave", &[]), "sem.chave");
    }

    #[test]
    fn interpolates_named_arguments() {
        let store = I18nStore::new();
        let msg = store.translate("en", "unknown_field", &[("field", "paginacao1")]);
        assert_eq!(msg, "Field 'paginacao1' is not a round field (1 to 6).");
    }
}
