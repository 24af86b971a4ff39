// src/models/contrato.rs

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "contrato_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum StatusContrato {
    Ativo,
    Pausado,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Contrato {
    pub id: Uuid,

    #[schema(ignore)]
    pub id_usuario: Uuid,

    pub id_locatario: Uuid,
    pub id_veiculo: Uuid,

    #[schema(example = "300.00")]
    pub valor: Decimal,

    // Descritor no formato de armazenamento, ex: "weekly@mon@20:00".
    // Validado na borda via `Recorrencia::from_str`.
    #[schema(example = "weekly@mon@20:00")]
    pub recorrencia: String,

    pub status: StatusContrato,

    #[schema(value_type = String, format = Date, example = "2024-01-01")]
    pub data_inicio: NaiveDate,

    pub proxima_cobranca: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

// Linha da listagem, com os dados do locatário e do veículo já juntos
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContratoDetalhe {
    pub id: Uuid,
    pub id_locatario: Uuid,
    pub id_veiculo: Uuid,
    pub valor: Decimal,
    pub recorrencia: String,
    pub status: StatusContrato,
    #[schema(value_type = String, format = Date)]
    pub data_inicio: NaiveDate,
    pub proxima_cobranca: DateTime<Utc>,
    pub nome_locatario: String,
    pub placa: String,
    pub modelo: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContratoPayload {
    pub id_locatario: Uuid,
    pub id_veiculo: Uuid,

    // Valor monetário nunca entra zerado ou negativo: ele vira a
    // primeira fatura e alimenta os totais do dashboard
    #[validate(custom(function = valor_positivo))]
    #[schema(example = "300.00")]
    pub valor: Decimal,

    #[schema(example = "weekly@mon@20:00")]
    pub recorrencia: String,

    #[serde(default = "default_status")]
    pub status: StatusContrato,

    #[schema(value_type = String, format = Date, example = "2024-01-01")]
    pub data_inicio: NaiveDate,
}

fn default_status() -> StatusContrato {
    StatusContrato::Ativo
}

fn valor_positivo(valor: &Decimal) -> Result<(), ValidationError> {
    if *valor <= Decimal::ZERO {
        let mut erro = ValidationError::new("valor_positivo");
        erro.message = Some("O valor deve ser maior que zero".into());
        return Err(erro);
    }
    Ok(())
}

// =============================================================================
//  DESCRITOR DE RECORRÊNCIA
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frequencia {
    Diaria,
    Semanal,
    Quinzenal,
    Mensal,
}

/// Descritor estruturado de recorrência. Formato de armazenamento:
/// `daily@20:00`, `weekly@mon@20:00`, `biweekly@fri@20:00`,
/// `monthly@31@20:00`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recorrencia {
    pub frequencia: Frequencia,
    // Âncora: dia da semana (semanal/quinzenal) ou dia do mês (mensal).
    // Diária não tem âncora, por definição.
    pub dia_semana: Option<Weekday>,
    pub dia_mes: Option<u32>,
    pub horario: NaiveTime,
}

impl Recorrencia {
    fn dia_semana_de(token: &str) -> Option<Weekday> {
        match token {
            "mon" => Some(Weekday::Mon),
            "tue" => Some(Weekday::Tue),
            "wed" => Some(Weekday::Wed),
            "thu" => Some(Weekday::Thu),
            "fri" => Some(Weekday::Fri),
            "sat" => Some(Weekday::Sat),
            "sun" => Some(Weekday::Sun),
            _ => None,
        }
    }

    fn dia_semana_str(dia: Weekday) -> &'static str {
        match dia {
            Weekday::Mon => "mon",
            Weekday::Tue => "tue",
            Weekday::Wed => "wed",
            Weekday::Thu => "thu",
            Weekday::Fri => "fri",
            Weekday::Sat => "sat",
            Weekday::Sun => "sun",
        }
    }
}

impl FromStr for Recorrencia {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let partes: Vec<&str> = s.split('@').collect();

        let horario_de = |token: &str| {
            NaiveTime::parse_from_str(token, "%H:%M")
                .map_err(|_| format!("horário inválido: '{token}' (esperado HH:MM)"))
        };

        match partes.as_slice() {
            ["daily", horario] => Ok(Recorrencia {
                frequencia: Frequencia::Diaria,
                dia_semana: None,
                dia_mes: None,
                horario: horario_de(horario)?,
            }),
            [freq @ ("weekly" | "biweekly"), dia, horario] => {
                let dia_semana = Self::dia_semana_de(dia)
                    .ok_or_else(|| format!("dia da semana inválido: '{dia}'"))?;
                Ok(Recorrencia {
                    frequencia: if *freq == "weekly" {
                        Frequencia::Semanal
                    } else {
                        Frequencia::Quinzenal
                    },
                    dia_semana: Some(dia_semana),
                    dia_mes: None,
                    horario: horario_de(horario)?,
                })
            }
            ["monthly", dia, horario] => {
                let dia_mes: u32 = dia
                    .parse()
                    .ok()
                    .filter(|d| (1..=31).contains(d))
                    .ok_or_else(|| format!("dia do mês inválido: '{dia}' (esperado 1..31)"))?;
                Ok(Recorrencia {
                    frequencia: Frequencia::Mensal,
                    dia_semana: None,
                    dia_mes: Some(dia_mes),
                    horario: horario_de(horario)?,
                })
            }
            _ => Err(format!("formato de recorrência desconhecido: '{s}'")),
        }
    }
}

impl fmt::Display for Recorrencia {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let horario = self.horario.format("%H:%M");
        match self.frequencia {
            Frequencia::Diaria => write!(f, "daily@{horario}"),
            Frequencia::Semanal => write!(
                f,
                "weekly@{}@{horario}",
                Self::dia_semana_str(self.dia_semana.unwrap_or(Weekday::Mon))
            ),
            Frequencia::Quinzenal => write!(
                f,
                "biweekly@{}@{horario}",
                Self::dia_semana_str(self.dia_semana.unwrap_or(Weekday::Mon))
            ),
            Frequencia::Mensal => write!(f, "monthly@{}@{horario}", self.dia_mes.unwrap_or(1)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn payload_rejeita_valor_nao_positivo() {
        let mut payload = ContratoPayload {
            id_locatario: Uuid::new_v4(),
            id_veiculo: Uuid::new_v4(),
            valor: dec!(-300.00),
            recorrencia: "weekly@mon@20:00".into(),
            status: StatusContrato::Ativo,
            data_inicio: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        };
        assert!(payload.validate().is_err());

        payload.valor = Decimal::ZERO;
        assert!(payload.validate().is_err());

        payload.valor = dec!(300.00);
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn parse_semanal_com_ancora() {
        let r: Recorrencia = "weekly@mon@20:00".parse().unwrap();
        assert_eq!(r.frequencia, Frequencia::Semanal);
        assert_eq!(r.dia_semana, Some(Weekday::Mon));
        assert_eq!(r.horario, NaiveTime::from_hms_opt(20, 0, 0).unwrap());
    }

    #[test]
    fn parse_diaria_nao_aceita_ancora() {
        assert!("daily@mon@20:00".parse::<Recorrencia>().is_err());
        assert!("daily@20:00".parse::<Recorrencia>().is_ok());
    }

    #[test]
    fn parse_mensal_valida_dia_do_mes() {
        assert!("monthly@31@08:30".parse::<Recorrencia>().is_ok());
        assert!("monthly@0@08:30".parse::<Recorrencia>().is_err());
        assert!("monthly@32@08:30".parse::<Recorrencia>().is_err());
    }

    #[test]
    fn parse_rejeita_horario_invalido() {
        assert!("weekly@mon@25:00".parse::<Recorrencia>().is_err());
        assert!("weekly@mon@20h00".parse::<Recorrencia>().is_err());
    }

    #[test]
    fn display_faz_ida_e_volta() {
        for s in ["daily@20:00", "weekly@fri@20:00", "biweekly@sat@07:15", "monthly@31@20:00"] {
            let r: Recorrencia = s.parse().unwrap();
            assert_eq!(r.to_string(), s);
        }
    }
}
