// src/services/stage.rs

use crate::models::designer::{BadgeTone, DesignItem, ItemCard, Stage, ROUNDS};

type StageRule = fn(&DesignItem) -> Option<Stage>;

/// Regras avaliadas de cima para baixo; a primeira que casar define a etapa.
const STAGE_RULES: &[StageRule] = &[paginacao, recusa_mais_alta, versao_mais_alta, duvidas];

pub fn current_stage(item: &DesignItem) -> Stage {
    STAGE_RULES
        .iter()
        .find_map(|rule| rule(item))
        .unwrap_or(Stage::Iniciando)
}

fn paginacao(item: &DesignItem) -> Option<Stage> {
    item.paginacao.then_some(Stage::Paginacao)
}

fn recusa_mais_alta(item: &DesignItem) -> Option<Stage> {
    rounds_desc().find(|&v| item.round(v).recusada).map(Stage::Recusada)
}

// Na versão mais alta com movimento: aprovada aguarda paginação,
// só com maquete aguarda a aprovação. Não existe "Em M{v+1}": uma versão
// aprovada sempre mostra "Aguardando P", mesmo com versões seguintes livres.
fn versao_mais_alta(item: &DesignItem) -> Option<Stage> {
    rounds_desc().find_map(|v| {
        let round = item.round(v);
        if round.aprovacao_recebida {
            Some(Stage::AguardandoPaginacao)
        } else if round.maquete_enviada {
            Some(Stage::AguardandoAprovacao(v))
        } else {
            None
        }
    })
}

fn duvidas(item: &DesignItem) -> Option<Stage> {
    item.duvidas.then_some(Stage::EmDuvidas)
}

fn rounds_desc() -> impl Iterator<Item = u8> {
    (1..=ROUNDS as u8).rev()
}

pub fn badge_tone(stage: Stage) -> BadgeTone {
    match stage {
        Stage::Paginacao => BadgeTone::Success,
        Stage::AguardandoPaginacao | Stage::AguardandoAprovacao(_) => BadgeTone::Warning,
        Stage::Recusada(_) | Stage::EmDuvidas => BadgeTone::Destructive,
        Stage::Iniciando => BadgeTone::Neutral,
    }
}

/// A versão 1 aparece sempre; a seguinte abre quando a anterior é recusada
/// ou quando já tem algum dado.
pub fn visible_rounds(item: &DesignItem) -> Vec<u8> {
    let mut visible = vec![1];
    for v in 2..=ROUNDS as u8 {
        let round = item.round(v);
        if item.round(v - 1).recusada || round.maquete_enviada || round.aprovacao_recebida {
            visible.push(v);
        }
    }
    visible
}

/// O bloco de finalização só aparece depois de alguma aprovação.
pub fn can_finalize(item: &DesignItem) -> bool {
    item.rounds.iter().any(|r| r.aprovacao_recebida)
}

pub fn card(item: DesignItem) -> ItemCard {
    let stage = current_stage(&item);
    ItemCard {
        badge: badge_tone(stage),
        visible_rounds: visible_rounds(&item),
        can_finalize: can_finalize(&item),
        stage,
        item,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn item() -> DesignItem {
        let mut item = DesignItem::entering_workflow(
            Uuid::new_v4(),
            Uuid::new_v4(),
            Uuid::new_v4(),
            "Banner".into(),
            Utc::now(),
        );
        item.em_curso = false;
        item
    }

    #[test]
    fn blank_item_is_starting() {
        assert_eq!(current_stage(&item()), Stage::Iniciando);
        assert_eq!(badge_tone(Stage::Iniciando), BadgeTone::Neutral);
    }

    #[test]
    fn paginacao_wins_over_everything() {
        let mut item = item();
        item.rounds[0].maquete_enviada = true;
        item.rounds[0].recusada = true;
        item.duvidas = true;
        item.paginacao = true;
        assert_eq!(current_stage(&item), Stage::Paginacao);
    }

    #[test]
    fn approved_round_waits_for_paginacao_even_with_free_next_round() {
        let mut item = item();
        item.rounds[1].maquete_enviada = true;
        item.rounds[1].aprovacao_recebida = true;
        assert!(item.round(3).is_blank());
        assert_eq!(current_stage(&item), Stage::AguardandoPaginacao);
        assert_eq!(current_stage(&item).to_string(), "Aguardando P");
    }

    #[test]
    fn highest_refusal_wins_over_later_drafts() {
        let mut item = item();
        item.rounds[0].recusada = true;
        item.rounds[2].recusada = true;
        item.rounds[3].maquete_enviada = true;
        assert_eq!(current_stage(&item), Stage::Recusada(3));
    }

    #[test]
    fn highest_round_decides_the_waiting_stage() {
        let mut item = item();
        item.rounds[0].maquete_enviada = true;
        item.rounds[0].aprovacao_recebida = true;
        item.rounds[1].maquete_enviada = true;
        assert_eq!(current_stage(&item), Stage::AguardandoAprovacao(2));

        item.rounds[1].aprovacao_recebida = true;
        assert_eq!(current_stage(&item), Stage::AguardandoPaginacao);
    }

    #[test]
    fn doubts_only_show_before_any_draft() {
        let mut item = item();
        item.duvidas = true;
        assert_eq!(current_stage(&item), Stage::EmDuvidas);

        item.rounds[0].maquete_enviada = true;
        assert_eq!(current_stage(&item), Stage::AguardandoAprovacao(1));
    }

    #[test]
    fn badge_tones_follow_stage_family() {
        assert_eq!(badge_tone(Stage::Paginacao), BadgeTone::Success);
        assert_eq!(badge_tone(Stage::AguardandoAprovacao(4)), BadgeTone::Warning);
        assert_eq!(badge_tone(Stage::AguardandoPaginacao), BadgeTone::Warning);
        assert_eq!(badge_tone(Stage::Recusada(1)), BadgeTone::Destructive);
        assert_eq!(badge_tone(Stage::EmDuvidas), BadgeTone::Destructive);
    }

    #[test]
    fn refusal_opens_the_next_round() {
        let mut item = item();
        assert_eq!(visible_rounds(&item), vec![1]);

        item.rounds[0].recusada = true;
        assert_eq!(visible_rounds(&item), vec![1, 2]);

        item.rounds[3].maquete_enviada = true;
        assert_eq!(visible_rounds(&item), vec![1, 2, 4]);
    }

    #[test]
    fn card_reports_finalization_after_approval() {
        let mut item = item();
        assert!(!card(item.clone()).can_finalize);

        item.rounds[0].maquete_enviada = true;
        item.rounds[0].aprovacao_recebida = true;
        let card = card(item);
        assert!(card.can_finalize);
        assert_eq!(card.stage.to_string(), "Aguardando P");
        assert_eq!(card.badge, BadgeTone::Warning);
    }
}
