// src/models/designer.rs

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{ser::SerializeMap, Deserialize, Serialize, Serializer};
use sqlx::{postgres::PgRow, FromRow, Row};
use utoipa::ToSchema;
use uuid::Uuid;

/// Número máximo de versões (rodadas de maquete) por item.
pub const ROUNDS: usize = 6;

// --- Rodadas ---

/// Uma versão do ciclo maquete → aprovação / recusa.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Round {
    pub maquete_enviada: bool,
    pub data_maquete_enviada: Option<DateTime<Utc>>,
    pub aprovacao_recebida: bool,
    pub data_aprovacao_recebida: Option<DateTime<Utc>>,
    pub recusada: bool,
    pub data_recusada: Option<DateTime<Utc>>,
}

impl Round {
    pub fn is_blank(&self) -> bool {
        *self == Round::default()
    }
}

/// Os três checkboxes de uma versão.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum RoundField {
    Maquete,
    Aprovacao,
    Recusa,
}

impl RoundField {
    pub fn flag_column(self) -> RoundColumn {
        match self {
            RoundField::Maquete => RoundColumn::Maquete,
            RoundField::Aprovacao => RoundColumn::Aprovacao,
            RoundField::Recusa => RoundColumn::Recusa,
        }
    }

    pub fn date_column(self) -> RoundColumn {
        match self {
            RoundField::Maquete => RoundColumn::DataMaquete,
            RoundField::Aprovacao => RoundColumn::DataAprovacao,
            RoundField::Recusa => RoundColumn::DataRecusa,
        }
    }

    /// Aprovação e recusa são decisões do cliente sobre a maquete.
    pub fn is_decision(self) -> bool {
        matches!(self, RoundField::Aprovacao | RoundField::Recusa)
    }
}

/// Campo booleano de uma versão, ex.: `aprovacao_recebida3` ou `r2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleTarget {
    round: u8,
    field: RoundField,
}

impl ToggleTarget {
    pub fn new(round: u8, field: RoundField) -> Option<Self> {
        if (1..=ROUNDS as u8).contains(&round) {
            Some(Self { round, field })
        } else {
            None
        }
    }

    /// Aceita os nomes da tabela (`maquete_enviada1`, `aprovacao_recebida1`, `R1`)
    /// e os aliases da API (`recusada1`, `r1`).
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim();
        let split_at = name.find(|c: char| c.is_ascii_digit())?;
        let (prefix, digits) = name.split_at(split_at);
        let round: u8 = digits.parse().ok()?;

        let field = match prefix {
            "maquete_enviada" => RoundField::Maquete,
            "aprovacao_recebida" => RoundField::Aprovacao,
            "recusada" | "r" | "R" => RoundField::Recusa,
            _ => return None,
        };

        Self::new(round, field)
    }

    pub fn round(&self) -> u8 {
        self.round
    }

    pub fn field(&self) -> RoundField {
        self.field
    }

    pub fn flag_column(&self) -> Column {
        Column::Round(self.round, self.field.flag_column())
    }

    pub fn date_column(&self) -> Column {
        Column::Round(self.round, self.field.date_column())
    }
}

impl fmt::Display for ToggleTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.flag_column().api_name())
    }
}

// --- Item ---

/// Item de produção no fluxo do designer (`designer_items` + `items_base`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DesignItem {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,
    pub item_id: Uuid,
    pub folha_obra_id: Uuid,

    #[schema(example = "Cartaz A3 campanha verão")]
    pub descricao: String,
    #[schema(example = "CRT-A3-001")]
    pub codigo: Option<String>,
    #[schema(example = 250)]
    pub quantidade: Option<i32>,

    pub em_curso: bool,
    pub data_em_curso: Option<DateTime<Utc>>,
    pub duvidas: bool,
    pub data_duvidas: Option<DateTime<Utc>>,

    #[schema(value_type = Vec<Round>)]
    pub rounds: [Round; ROUNDS],

    pub paginacao: bool,
    pub data_paginacao: Option<DateTime<Utc>>,
    #[schema(example = "P:\\Trabalhos\\2024\\FO-1234")]
    pub path_trabalho: Option<String>,

    #[schema(example = "OFFSET")]
    pub complexidade: Option<String>,
    pub notas: Option<String>,
    pub designer: Option<String>,

    pub data_in: Option<DateTime<Utc>>,
    pub data_saida: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,

    /// Entrada da folha de obra (`folhas_obras.data_in`); só leitura.
    pub job_data_in: Option<DateTime<Utc>>,
}

impl DesignItem {
    /// Item recém-entrado no fluxo: em curso, nenhuma versão iniciada.
    pub fn entering_workflow(
        id: Uuid,
        item_id: Uuid,
        folha_obra_id: Uuid,
        descricao: String,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            item_id,
            folha_obra_id,
            descricao,
            codigo: None,
            quantidade: None,
            em_curso: true,
            data_em_curso: Some(now),
            duvidas: false,
            data_duvidas: None,
            rounds: Default::default(),
            paginacao: false,
            data_paginacao: None,
            path_trabalho: None,
            complexidade: None,
            notas: None,
            designer: None,
            data_in: Some(now),
            data_saida: None,
            updated_at: Some(now),
            job_data_in: None,
        }
    }

    /// `v` começa em 1.
    pub fn round(&self, v: u8) -> &Round {
        &self.rounds[usize::from(v) - 1]
    }

    fn round_mut(&mut self, v: u8) -> &mut Round {
        &mut self.rounds[usize::from(v) - 1]
    }
}

// As colunas de cada versão são planas no banco; montamos o array aqui.
impl<'r> FromRow<'r, PgRow> for DesignItem {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        let flag = |name: &str| -> Result<bool, sqlx::Error> {
            Ok(row.try_get::<Option<bool>, _>(name)?.unwrap_or(false))
        };
        let date = |name: &str| row.try_get::<Option<DateTime<Utc>>, _>(name);

        let mut rounds: [Round; ROUNDS] = Default::default();
        for (idx, round) in rounds.iter_mut().enumerate() {
            let v = idx + 1;
            *round = Round {
                maquete_enviada: flag(&format!("maquete_enviada{v}"))?,
                data_maquete_enviada: date(&format!("data_maquete_enviada{v}"))?,
                aprovacao_recebida: flag(&format!("aprovacao_recebida{v}"))?,
                data_aprovacao_recebida: date(&format!("data_aprovacao_recebida{v}"))?,
                recusada: flag(&format!("recusada{v}"))?,
                data_recusada: date(&format!("data_recusada{v}"))?,
            };
        }

        Ok(Self {
            id: row.try_get("id")?,
            item_id: row.try_get("item_id")?,
            folha_obra_id: row.try_get("folha_obra_id")?,
            descricao: row.try_get::<Option<String>, _>("descricao")?.unwrap_or_default(),
            codigo: row.try_get("codigo")?,
            quantidade: row.try_get("quantidade")?,
            em_curso: flag("em_curso")?,
            data_em_curso: date("data_em_curso")?,
            duvidas: flag("duvidas")?,
            data_duvidas: date("data_duvidas")?,
            rounds,
            paginacao: flag("paginacao")?,
            data_paginacao: date("data_paginacao")?,
            path_trabalho: row.try_get("path_trabalho")?,
            complexidade: row.try_get("complexidade")?,
            notas: row.try_get("notas")?,
            designer: row.try_get("designer")?,
            data_in: date("data_in")?,
            data_saida: date("data_saida")?,
            updated_at: date("updated_at")?,
            job_data_in: date("job_data_in")?,
        })
    }
}

// --- Colunas e conjunto de alterações ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RoundColumn {
    Maquete,
    DataMaquete,
    Aprovacao,
    DataAprovacao,
    Recusa,
    DataRecusa,
}

impl RoundColumn {
    pub const ALL: [RoundColumn; 6] = [
        RoundColumn::Maquete,
        RoundColumn::DataMaquete,
        RoundColumn::Aprovacao,
        RoundColumn::DataAprovacao,
        RoundColumn::Recusa,
        RoundColumn::DataRecusa,
    ];

    pub fn is_date(self) -> bool {
        matches!(
            self,
            RoundColumn::DataMaquete | RoundColumn::DataAprovacao | RoundColumn::DataRecusa
        )
    }
}

/// Tabela onde a coluna mora.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    DesignerItems,
    ItemsBase,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Column {
    Round(u8, RoundColumn),
    Paginacao,
    DataPaginacao,
    PathTrabalho,
    DataSaida,
    Duvidas,
    DataDuvidas,
    EmCurso,
    DataEmCurso,
    Complexidade,
    Notas,
    Designer,
    Descricao,
    Codigo,
    Quantidade,
}

impl Column {
    pub fn table(&self) -> Table {
        match self {
            Column::Descricao | Column::Codigo | Column::Quantidade => Table::ItemsBase,
            _ => Table::DesignerItems,
        }
    }

    /// Nome exposto na API e nos logs.
    pub fn api_name(&self) -> String {
        match self {
            Column::Round(v, rc) => match rc {
                RoundColumn::Maquete => format!("maquete_enviada{v}"),
                RoundColumn::DataMaquete => format!("data_maquete_enviada{v}"),
                RoundColumn::Aprovacao => format!("aprovacao_recebida{v}"),
                RoundColumn::DataAprovacao => format!("data_aprovacao_recebida{v}"),
                RoundColumn::Recusa => format!("recusada{v}"),
                RoundColumn::DataRecusa => format!("data_recusada{v}"),
            },
            other => other.plain_name().to_string(),
        }
    }

    /// Identificador SQL já com aspas quando necessário (`"R1"`, `"R1_date"`).
    pub fn sql_name(&self) -> String {
        match self {
            Column::Round(v, RoundColumn::Recusa) => format!("\"R{v}\""),
            Column::Round(v, RoundColumn::DataRecusa) => format!("\"R{v}_date\""),
            Column::Round(..) => self.api_name(),
            other => other.plain_name().to_string(),
        }
    }

    fn plain_name(&self) -> &'static str {
        match self {
            Column::Round(..) => "",
            Column::Paginacao => "paginacao",
            Column::DataPaginacao => "data_paginacao",
            Column::PathTrabalho => "path_trabalho",
            Column::DataSaida => "data_saida",
            Column::Duvidas => "duvidas",
            Column::DataDuvidas => "data_duvidas",
            Column::EmCurso => "em_curso",
            Column::DataEmCurso => "data_em_curso",
            Column::Complexidade => "complexidade",
            Column::Notas => "notas",
            Column::Designer => "designer",
            Column::Descricao => "descricao",
            Column::Codigo => "codigo",
            Column::Quantidade => "quantidade",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Timestamp(Option<DateTime<Utc>>),
    Text(Option<String>),
    Int(Option<i32>),
}

impl FieldValue {
    fn as_bool(&self) -> bool {
        matches!(self, FieldValue::Bool(true))
    }

    fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            FieldValue::Timestamp(ts) => *ts,
            _ => None,
        }
    }

    fn as_text(&self) -> Option<String> {
        match self {
            FieldValue::Text(text) => text.clone(),
            _ => None,
        }
    }

    fn as_int(&self) -> Option<i32> {
        match self {
            FieldValue::Int(n) => *n,
            _ => None,
        }
    }
}

/// Lote de alterações de um item. O mesmo valor é aplicado no estado local
/// e enviado para persistência.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldUpdateSet(BTreeMap<Column, FieldValue>);

impl FieldUpdateSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_bool(&mut self, column: Column, value: bool) -> &mut Self {
        self.0.insert(column, FieldValue::Bool(value));
        self
    }

    pub fn set_timestamp(&mut self, column: Column, value: Option<DateTime<Utc>>) -> &mut Self {
        self.0.insert(column, FieldValue::Timestamp(value));
        self
    }

    pub fn set_text(&mut self, column: Column, value: Option<String>) -> &mut Self {
        self.0.insert(column, FieldValue::Text(value));
        self
    }

    pub fn set_int(&mut self, column: Column, value: Option<i32>) -> &mut Self {
        self.0.insert(column, FieldValue::Int(value));
        self
    }

    /// Booleano + data acoplados: `now` quando liga, `None` quando desliga.
    pub fn set_flag_with_date(
        &mut self,
        flag: Column,
        date: Column,
        value: bool,
        now: DateTime<Utc>,
    ) -> &mut Self {
        self.set_bool(flag, value);
        self.set_timestamp(date, value.then_some(now))
    }

    /// Zera a versão inteira (três flags e três datas).
    pub fn reset_round(&mut self, v: u8) -> &mut Self {
        for rc in RoundColumn::ALL {
            let column = Column::Round(v, rc);
            if rc.is_date() {
                self.set_timestamp(column, None);
            } else {
                self.set_bool(column, false);
            }
        }
        self
    }

    pub fn get(&self, column: &Column) -> Option<&FieldValue> {
        self.0.get(column)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Column, &FieldValue)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn touches(&self, table: Table) -> bool {
        self.0.keys().any(|c| c.table() == table)
    }

    pub fn apply(&self, item: &mut DesignItem) {
        for (column, value) in &self.0 {
            match *column {
                Column::Round(v, rc) => {
                    let round = item.round_mut(v);
                    match rc {
                        RoundColumn::Maquete => round.maquete_enviada = value.as_bool(),
                        RoundColumn::DataMaquete => round.data_maquete_enviada = value.as_timestamp(),
                        RoundColumn::Aprovacao => round.aprovacao_recebida = value.as_bool(),
                        RoundColumn::DataAprovacao => {
                            round.data_aprovacao_recebida = value.as_timestamp()
                        }
                        RoundColumn::Recusa => round.recusada = value.as_bool(),
                        RoundColumn::DataRecusa => round.data_recusada = value.as_timestamp(),
                    }
                }
                Column::Paginacao => item.paginacao = value.as_bool(),
                Column::DataPaginacao => item.data_paginacao = value.as_timestamp(),
                Column::PathTrabalho => item.path_trabalho = value.as_text(),
                Column::DataSaida => item.data_saida = value.as_timestamp(),
                Column::Duvidas => item.duvidas = value.as_bool(),
                Column::DataDuvidas => item.data_duvidas = value.as_timestamp(),
                Column::EmCurso => item.em_curso = value.as_bool(),
                Column::DataEmCurso => item.data_em_curso = value.as_timestamp(),
                Column::Complexidade => item.complexidade = value.as_text(),
                Column::Notas => item.notas = value.as_text(),
                Column::Designer => item.designer = value.as_text(),
                Column::Descricao => item.descricao = value.as_text().unwrap_or_default(),
                Column::Codigo => item.codigo = value.as_text(),
                Column::Quantidade => item.quantidade = value.as_int(),
            }
        }
    }
}

impl Serialize for FieldUpdateSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (column, value) in &self.0 {
            map.serialize_entry(&column.api_name(), value)?;
        }
        map.end()
    }
}

// --- Flags globais ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ItemFlag {
    Duvidas,
    EmCurso,
}

impl ItemFlag {
    pub fn columns(self) -> (Column, Column) {
        match self {
            ItemFlag::Duvidas => (Column::Duvidas, Column::DataDuvidas),
            ItemFlag::EmCurso => (Column::EmCurso, Column::DataEmCurso),
        }
    }
}

// --- Projeções para o cartão do item ---

/// Etapa atual exibida no badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Paginacao,
    Recusada(u8),
    AguardandoPaginacao,
    AguardandoAprovacao(u8),
    EmDuvidas,
    Iniciando,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Paginacao => f.write_str("Paginação"),
            Stage::Recusada(v) => write!(f, "R{v} Recusada"),
            Stage::AguardandoPaginacao => f.write_str("Aguardando P"),
            Stage::AguardandoAprovacao(v) => write!(f, "Aguardando A{v}"),
            Stage::EmDuvidas => f.write_str("Em Dúvidas"),
            Stage::Iniciando => f.write_str("Iniciando"),
        }
    }
}

impl Serialize for Stage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum BadgeTone {
    Success,
    Warning,
    Destructive,
    Neutral,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemCard {
    #[serde(flatten)]
    pub item: DesignItem,
    #[schema(value_type = String, example = "Aguardando A1")]
    pub stage: Stage,
    pub badge: BadgeTone,
    #[schema(example = json!([1, 2]))]
    pub visible_rounds: Vec<u8>,
    pub can_finalize: bool,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MutationResponse {
    /// `false` quando a operação foi descartada pela trava maquete → decisão.
    pub applied: bool,
    #[schema(value_type = Object)]
    pub changes: FieldUpdateSet,
    pub card: ItemCard,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEvent {
    #[schema(example = "M1 Enviada")]
    pub label: String,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TimelineDurations {
    #[schema(example = "12 dias")]
    pub total: Option<String>,
    pub duvidas_ate_paginacao: Option<String>,
    pub aprovacao_ate_paginacao: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemTimeline {
    pub item_id: Uuid,
    pub events: Vec<TimelineEvent>,
    pub durations: TimelineDurations,
}

// --- Entrada no fluxo ---

#[derive(Debug, Clone)]
pub struct NewDesignItem {
    pub folha_obra_id: Uuid,
    pub descricao: String,
    pub codigo: Option<String>,
    pub quantidade: i32,
}

impl NewDesignItem {
    /// Item completo, com ids novos e os valores de entrada no fluxo.
    pub fn into_item(self, now: DateTime<Utc>) -> DesignItem {
        let mut item = DesignItem::entering_workflow(
            Uuid::new_v4(),
            Uuid::new_v4(),
            self.folha_obra_id,
            self.descricao,
            now,
        );
        item.codigo = self.codigo;
        item.quantidade = Some(self.quantidade);
        item
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 10, 9, 30, 0).unwrap()
    }

    #[test]
    fn new_item_enters_workflow_with_fresh_ids() {
        let job = Uuid::new_v4();
        let item = NewDesignItem {
            folha_obra_id: job,
            descricao: "Flyer A5".into(),
            codigo: Some("FLY-A5".into()),
            quantidade: 1000,
        }
        .into_item(now());

        assert_ne!(item.id, item.item_id);
        assert_eq!(item.folha_obra_id, job);
        assert_eq!(item.codigo.as_deref(), Some("FLY-A5"));
        assert_eq!(item.quantidade, Some(1000));
        assert!(item.em_curso);
        assert_eq!(item.data_em_curso, Some(now()));
        assert_eq!(item.data_in, Some(now()));
        assert!(!item.duvidas && !item.paginacao);
        assert!(item.rounds.iter().all(Round::is_blank));
    }

    #[test]
    fn parses_table_and_api_field_names() {
        let t = ToggleTarget::parse("maquete_enviada1").unwrap();
        assert_eq!((t.round(), t.field()), (1, RoundField::Maquete));

        let t = ToggleTarget::parse("aprovacao_recebida6").unwrap();
        assert_eq!((t.round(), t.field()), (6, RoundField::Aprovacao));

        for name in ["r3", "R3", "recusada3"] {
            let t = ToggleTarget::parse(name).unwrap();
            assert_eq!((t.round(), t.field()), (3, RoundField::Recusa));
        }
    }

    #[test]
    fn rejects_unknown_fields_and_out_of_range_rounds() {
        assert!(ToggleTarget::parse("maquete_enviada0").is_none());
        assert!(ToggleTarget::parse("maquete_enviada7").is_none());
        assert!(ToggleTarget::parse("paginacao").is_none());
        assert!(ToggleTarget::parse("duvidas1").is_none());
        assert!(ToggleTarget::parse("").is_none());
    }

    #[test]
    fn refusal_columns_keep_legacy_sql_names() {
        let t = ToggleTarget::parse("recusada2").unwrap();
        assert_eq!(t.flag_column().sql_name(), "\"R2\"");
        assert_eq!(t.date_column().sql_name(), "\"R2_date\"");
        assert_eq!(t.flag_column().api_name(), "recusada2");
        assert_eq!(Column::Round(4, RoundColumn::DataMaquete).sql_name(), "data_maquete_enviada4");
    }

    #[test]
    fn apply_writes_round_and_global_fields() {
        let mut item = DesignItem::entering_workflow(
            Uuid::new_v4(),
            Uuid::new_v4(),
            Uuid::new_v4(),
            "Flyer".into(),
            now(),
        );

        let mut updates = FieldUpdateSet::new();
        updates
            .set_flag_with_date(
                Column::Round(2, RoundColumn::Maquete),
                Column::Round(2, RoundColumn::DataMaquete),
                true,
                now(),
            )
            .set_text(Column::PathTrabalho, Some("P:".into()))
            .set_int(Column::Quantidade, Some(40));
        updates.apply(&mut item);

        assert!(item.round(2).maquete_enviada);
        assert_eq!(item.round(2).data_maquete_enviada, Some(now()));
        assert!(item.round(1).is_blank());
        assert_eq!(item.path_trabalho.as_deref(), Some("P:"));
        assert_eq!(item.quantidade, Some(40));
    }

    #[test]
    fn serializes_changes_by_api_name() {
        let mut updates = FieldUpdateSet::new();
        updates
            .set_bool(Column::Round(1, RoundColumn::Recusa), false)
            .set_timestamp(Column::Round(1, RoundColumn::DataRecusa), None);

        let json = serde_json::to_value(&updates).unwrap();
        assert_eq!(json["recusada1"], serde_json::json!(false));
        assert!(json["data_recusada1"].is_null());
    }

    #[test]
    fn stage_labels_match_badge_text() {
        assert_eq!(Stage::Recusada(2).to_string(), "R2 Recusada");
        assert_eq!(Stage::AguardandoAprovacao(1).to_string(), "Aguardando A1");
        assert_eq!(Stage::AguardandoPaginacao.to_string(), "Aguardando P");
        assert_eq!(Stage::EmDuvidas.to_string(), "Em Dúvidas");
    }
}
