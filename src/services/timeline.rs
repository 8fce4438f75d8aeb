// src/services/timeline.rs

use chrono::{DateTime, Utc};

use crate::models::designer::{DesignItem, ItemTimeline, TimelineDurations, TimelineEvent};

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

pub fn timeline(item: &DesignItem) -> ItemTimeline {
    let mut events = Vec::new();

    for (idx, round) in item.rounds.iter().enumerate() {
        let v = idx + 1;
        if let Some(date) = round.data_maquete_enviada {
            events.push(event(format!("M{v} Enviada"), date));
        }
        // A data da recusa prevalece sobre a da aprovação.
        match (round.data_recusada, round.data_aprovacao_recebida) {
            (Some(date), _) => events.push(event(format!("R{v} Recusada"), date)),
            (None, Some(date)) => events.push(event(format!("A{v} Recebida"), date)),
            (None, None) => {}
        }
    }

    if let Some(date) = item.data_paginacao {
        events.push(event("Paginação".to_string(), date));
    }

    ItemTimeline {
        item_id: item.id,
        events,
        durations: durations(item),
    }
}

fn event(label: String, date: DateTime<Utc>) -> TimelineEvent {
    TimelineEvent { label, date }
}

fn durations(item: &DesignItem) -> TimelineDurations {
    let Some(paginacao) = item.data_paginacao else {
        return TimelineDurations::default();
    };

    TimelineDurations {
        // Conta desde a entrada da folha de obra, não do item.
        total: item.job_data_in.map(|start| days_label(start, paginacao)),
        duvidas_ate_paginacao: item.data_duvidas.map(|start| days_label(start, paginacao)),
        aprovacao_ate_paginacao: last_approval_date(item).map(|start| days_label(start, paginacao)),
    }
}

/// Data da aprovação da versão mais alta que tenha flag e data.
pub fn last_approval_date(item: &DesignItem) -> Option<DateTime<Utc>> {
    item.rounds
        .iter()
        .rev()
        .find(|r| r.aprovacao_recebida && r.data_aprovacao_recebida.is_some())
        .and_then(|r| r.data_aprovacao_recebida)
}

/// Dias arredondados para cima, sem sinal.
pub fn days_between(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
    let ms = (end - start).num_milliseconds().abs();
    (ms + DAY_MS - 1) / DAY_MS
}

fn days_label(start: DateTime<Utc>, end: DateTime<Utc>) -> String {
    match days_between(start, end) {
        1 => "1 dia".to_string(),
        n => format!("{n} dias"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use uuid::Uuid;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 8, 8, 0, 0).unwrap()
    }

    fn item() -> DesignItem {
        DesignItem::entering_workflow(
            Uuid::new_v4(),
            Uuid::new_v4(),
            Uuid::new_v4(),
            "Catálogo".into(),
            start(),
        )
    }

    #[test]
    fn partial_days_round_up() {
        assert_eq!(days_between(start(), start()), 0);
        assert_eq!(days_between(start(), start() + Duration::hours(1)), 1);
        assert_eq!(days_between(start() + Duration::hours(50), start()), 3);
        assert_eq!(days_label(start(), start() + Duration::days(1)), "1 dia");
        assert_eq!(days_label(start(), start() + Duration::days(4)), "4 dias");
    }

    #[test]
    fn events_follow_round_order_and_refusal_wins() {
        let mut item = item();
        item.rounds[0].maquete_enviada = true;
        item.rounds[0].data_maquete_enviada = Some(start() + Duration::days(1));
        item.rounds[0].recusada = true;
        item.rounds[0].data_recusada = Some(start() + Duration::days(2));
        item.rounds[0].data_aprovacao_recebida = Some(start() + Duration::days(2));
        item.rounds[1].maquete_enviada = true;
        item.rounds[1].data_maquete_enviada = Some(start() + Duration::days(3));

        let labels: Vec<_> = timeline(&item).events.into_iter().map(|e| e.label).collect();
        assert_eq!(labels, vec!["M1 Enviada", "R1 Recusada", "M2 Enviada"]);
    }

    #[test]
    fn durations_need_paginacao_date() {
        let mut item = item();
        assert_eq!(timeline(&item).durations, TimelineDurations::default());

        item.rounds[1].maquete_enviada = true;
        item.rounds[1].aprovacao_recebida = true;
        item.rounds[1].data_aprovacao_recebida = Some(start() + Duration::days(5));
        item.data_duvidas = Some(start() + Duration::days(2));
        item.job_data_in = Some(start());
        item.paginacao = true;
        item.data_paginacao = Some(start() + Duration::days(6));

        let tl = timeline(&item);
        assert_eq!(tl.durations.total.as_deref(), Some("6 dias"));
        assert_eq!(tl.durations.duvidas_ate_paginacao.as_deref(), Some("4 dias"));
        assert_eq!(tl.durations.aprovacao_ate_paginacao.as_deref(), Some("1 dia"));
        assert_eq!(tl.events.last().map(|e| e.label.as_str()), Some("Paginação"));
    }

    #[test]
    fn total_counts_from_job_entry_not_item_entry() {
        let mut item = item();
        item.job_data_in = Some(start() - Duration::days(3));
        item.paginacao = true;
        item.data_paginacao = Some(start() + Duration::days(2));

        assert_eq!(timeline(&item).durations.total.as_deref(), Some("5 dias"));

        item.job_data_in = None;
        assert_eq!(timeline(&item).durations.total, None);
    }

    #[test]
    fn approval_without_date_is_ignored() {
        let mut item = item();
        item.rounds[2].aprovacao_recebida = true;
        item.rounds[0].aprovacao_recebida = true;
        item.rounds[0].data_aprovacao_recebida = Some(start());
        assert_eq!(last_approval_date(&item), Some(start()));
    }
}
