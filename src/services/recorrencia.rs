// src/services/recorrencia.rs
//
// Motor de recorrência: deriva o próximo vencimento de um contrato a
// partir do descritor estruturado. Funções puras, sem efeito colateral;
// quem grava `proxima_cobranca` é o chamador (criação de contrato aqui,
// avanço pelo job externo de faturamento).

use chrono::{DateTime, Datelike, Duration, LocalResult, NaiveDate, NaiveDateTime, TimeZone, Utc, Weekday};
use chrono_tz::America::Sao_Paulo;
use chrono_tz::Tz;

use crate::models::contrato::{Frequencia, Recorrencia};

// Todos os horários do domínio (vencimento, corte das 23:30) são locais
// de Brasília.
pub const FUSO_LOCAL: Tz = Sao_Paulo;

/// Converte um horário local em instante absoluto. Horário local
/// inexistente ou ambíguo (mudança de relógio) resolve para o instante
/// válido mais próximo ADIANTE, nunca para trás, para não gerar
/// cobrança vencida no passado.
pub fn resolver_local_adiante(mut local: NaiveDateTime) -> DateTime<Utc> {
    for _ in 0..16 {
        match FUSO_LOCAL.from_local_datetime(&local) {
            LocalResult::Single(dt) => return dt.with_timezone(&Utc),
            LocalResult::Ambiguous(_, depois) => return depois.with_timezone(&Utc),
            LocalResult::None => local += Duration::minutes(15),
        }
    }
    // Um gap de relógio nunca passa de poucas horas; se chegamos aqui o
    // offset está irrecuperável e tratamos o horário como UTC mesmo.
    Utc.from_utc_datetime(&local)
}

/// Primeiro vencimento: a data de início do contrato combinada com o
/// horário do descritor.
pub fn primeira_cobranca(recorrencia: &Recorrencia, data_inicio: NaiveDate) -> DateTime<Utc> {
    resolver_local_adiante(data_inicio.and_time(recorrencia.horario))
}

/// Próximo vencimento a partir do anterior: diária soma 1 dia; semanal e
/// quinzenal avançam para a próxima ocorrência do dia da semana âncora
/// (quinzenal pula uma semana extra); mensal mantém o dia âncora no mês
/// seguinte, com clamp no fim do mês (31 num mês de 30 dias vira o
/// último dia).
pub fn proxima_cobranca(recorrencia: &Recorrencia, anterior: DateTime<Utc>) -> DateTime<Utc> {
    let data_anterior = anterior.with_timezone(&FUSO_LOCAL).date_naive();

    let proxima_data = match recorrencia.frequencia {
        Frequencia::Diaria => data_anterior + Duration::days(1),
        Frequencia::Semanal => proxima_ancora_semanal(
            data_anterior,
            recorrencia.dia_semana.unwrap_or(data_anterior.weekday()),
            1,
        ),
        Frequencia::Quinzenal => proxima_ancora_semanal(
            data_anterior,
            recorrencia.dia_semana.unwrap_or(data_anterior.weekday()),
            2,
        ),
        Frequencia::Mensal => proximo_mes_com_clamp(
            data_anterior,
            recorrencia.dia_mes.unwrap_or(data_anterior.day()),
        ),
    };

    resolver_local_adiante(proxima_data.and_time(recorrencia.horario))
}

// Próxima data estritamente depois de `apos` que cai na âncora, mais as
// semanas extras do intervalo (quinzenal = 1 extra).
fn proxima_ancora_semanal(apos: NaiveDate, ancora: Weekday, intervalo_semanas: i64) -> NaiveDate {
    let mut data = apos + Duration::days(1);
    while data.weekday() != ancora {
        data += Duration::days(1);
    }
    data + Duration::weeks(intervalo_semanas - 1)
}

fn proximo_mes_com_clamp(apos: NaiveDate, dia_ancora: u32) -> NaiveDate {
    let (ano, mes) = if apos.month() == 12 {
        (apos.year() + 1, 1)
    } else {
        (apos.year(), apos.month() + 1)
    };
    let ultimo = ultimo_dia_do_mes(ano, mes);
    NaiveDate::from_ymd_opt(ano, mes, dia_ancora.min(ultimo.day())).unwrap_or(ultimo)
}

fn ultimo_dia_do_mes(ano: i32, mes: u32) -> NaiveDate {
    let primeiro_do_proximo = if mes == 12 {
        NaiveDate::from_ymd_opt(ano + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(ano, mes + 1, 1)
    };
    // mes está sempre em 1..=12 aqui, o Option nunca é None
    primeiro_do_proximo.map(|d| d - Duration::days(1)).unwrap_or(apos_fallback(ano, mes))
}

fn apos_fallback(ano: i32, mes: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(ano, mes.clamp(1, 12), 28).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn rec(descritor: &str) -> Recorrencia {
        descritor.parse().unwrap()
    }

    #[test]
    fn primeira_cobranca_combina_data_e_horario_local() {
        // 2024-01-01 é segunda; 20:00 em São Paulo = 23:00 UTC
        let r = rec("weekly@mon@20:00");
        let primeira = primeira_cobranca(&r, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(primeira.to_rfc3339(), "2024-01-01T23:00:00+00:00");
    }

    #[test]
    fn ocorrencias_sao_estritamente_crescentes() {
        for descritor in ["daily@20:00", "weekly@mon@20:00", "biweekly@fri@08:00", "monthly@15@20:00"] {
            let r = rec(descritor);
            let mut atual = primeira_cobranca(&r, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
            for _ in 0..36 {
                let proxima = proxima_cobranca(&r, atual);
                assert!(proxima > atual, "{descritor}: {proxima} <= {atual}");
                atual = proxima;
            }
        }
    }

    #[test]
    fn semanal_ancorada_em_segunda_cai_sempre_em_segunda() {
        let r = rec("weekly@mon@20:00");
        let mut atual = primeira_cobranca(&r, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        for _ in 0..12 {
            atual = proxima_cobranca(&r, atual);
            let local = atual.with_timezone(&FUSO_LOCAL);
            assert_eq!(local.weekday(), Weekday::Mon);
            assert_eq!(local.hour(), 20);
        }
    }

    #[test]
    fn semanal_avanca_exatamente_sete_dias_quando_ja_ancorada() {
        let r = rec("weekly@mon@20:00");
        let primeira = primeira_cobranca(&r, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        let segunda = proxima_cobranca(&r, primeira);
        assert_eq!(segunda - primeira, Duration::days(7));
    }

    #[test]
    fn quinzenal_avanca_quatorze_dias() {
        let r = rec("biweekly@mon@20:00");
        let primeira = primeira_cobranca(&r, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        let segunda = proxima_cobranca(&r, primeira);
        assert_eq!(segunda - primeira, Duration::days(14));
    }

    #[test]
    fn semanal_fora_da_ancora_realinha_para_a_proxima_segunda() {
        // Início numa quarta (2024-01-03); a ocorrência seguinte deve
        // cair na segunda 2024-01-08
        let r = rec("weekly@mon@20:00");
        let primeira = primeira_cobranca(&r, NaiveDate::from_ymd_opt(2024, 1, 3).unwrap());
        let segunda = proxima_cobranca(&r, primeira);
        let local = segunda.with_timezone(&FUSO_LOCAL);
        assert_eq!(local.date_naive(), NaiveDate::from_ymd_opt(2024, 1, 8).unwrap());
    }

    #[test]
    fn mensal_dia_31_clampa_no_fim_de_fevereiro() {
        let r = rec("monthly@31@20:00");
        let janeiro = primeira_cobranca(&r, NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());
        let fevereiro = proxima_cobranca(&r, janeiro);
        let local = fevereiro.with_timezone(&FUSO_LOCAL);
        // 2024 é bissexto
        assert_eq!(local.date_naive(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());

        // E depois do clamp a âncora original é retomada: 31 de março
        let marco = proxima_cobranca(&r, fevereiro);
        let local = marco.with_timezone(&FUSO_LOCAL);
        assert_eq!(local.date_naive(), NaiveDate::from_ymd_opt(2024, 3, 31).unwrap());
    }

    #[test]
    fn mensal_em_ano_nao_bissexto_clampa_no_dia_28() {
        let r = rec("monthly@31@20:00");
        let janeiro = primeira_cobranca(&r, NaiveDate::from_ymd_opt(2023, 1, 31).unwrap());
        let fevereiro = proxima_cobranca(&r, janeiro);
        let local = fevereiro.with_timezone(&FUSO_LOCAL);
        assert_eq!(local.date_naive(), NaiveDate::from_ymd_opt(2023, 2, 28).unwrap());
    }

    #[test]
    fn diaria_soma_um_dia() {
        let r = rec("daily@20:00");
        let primeira = primeira_cobranca(&r, NaiveDate::from_ymd_opt(2024, 6, 10).unwrap());
        let segunda = proxima_cobranca(&r, primeira);
        assert_eq!(segunda - primeira, Duration::days(1));
    }
}
