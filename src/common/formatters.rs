// src/common/formatters.rs

/// Remove tudo que não for dígito. Usado antes de persistir
/// whatsapp/cpf/cep, que entram mascarados do formulário.
pub fn apenas_digitos(valor: &str) -> String {
    valor.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Padroniza o número de WhatsApp para o formato da API: 55DDD9XXXXXXXX
/// (13 dígitos). Exemplo: "(11) 99229-4869" -> "5511992294869".
pub fn normalizar_whatsapp(valor: &str) -> String {
    let mut limpo = apenas_digitos(valor);

    if limpo.is_empty() {
        return limpo;
    }

    // Se o usuário não digitou o 55 (DDI), nós adicionamos
    if limpo.len() <= 11 {
        limpo = format!("55{limpo}");
    }

    // Garante o "9" após o DDD (55 + DDD + 8 dígitos = 12)
    if limpo.len() == 12 {
        limpo.insert(4, '9');
    }

    limpo
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normaliza_numero_mascarado_sem_ddi() {
        assert_eq!(normalizar_whatsapp("(11) 99229-4869"), "5511992294869");
    }

    #[test]
    fn insere_nono_digito_quando_falta() {
        assert_eq!(normalizar_whatsapp("11 9229-4869"), "5511992294869");
    }

    #[test]
    fn mantem_numero_ja_completo() {
        assert_eq!(normalizar_whatsapp("5511992294869"), "5511992294869");
    }

    #[test]
    fn entrada_vazia_continua_vazia() {
        assert_eq!(normalizar_whatsapp(""), "");
    }
}
