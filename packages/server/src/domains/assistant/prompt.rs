use std::fmt::Write;

use crate::domains::providers::ProviderListing;

pub const FALLBACK_ANSWER: &str = "Lo siento, el asistente no está disponible en este momento. \
Intenta de nuevo en unos minutos o explora las categorías del directorio.";

pub const SYSTEM_PROMPT: &str = "Eres el asistente de Eventos 360, un directorio de proveedores \
de servicios para eventos. Responde en español, de forma breve y amable. Recomienda solo \
proveedores que aparezcan en el contexto y menciona su nombre y ciudad. Si el contexto no \
contiene un proveedor adecuado, dilo y sugiere explorar las categorías del directorio. No \
inventes precios, teléfonos ni datos que no estén en el contexto.";

/// User message: the directory context followed by the visitor's question
pub fn build_user_prompt(question: &str, context: &[ProviderListing]) -> String {
    let mut prompt = String::from("Proveedores del directorio:\n");

    if context.is_empty() {
        prompt.push_str("(sin proveedores relevantes)\n");
    }

    for provider in context {
        let _ = write!(prompt, "- {}", provider.name);
        if let Some(city) = &provider.city {
            let _ = write!(prompt, " ({})", city);
        }
        if let Some(category) = &provider.category {
            let _ = write!(prompt, " [{}]", category);
        }
        if let Some(description) = &provider.description {
            let _ = write!(prompt, ": {}", description);
        }
        prompt.push('\n');

        for service in &provider.services {
            let _ = write!(prompt, "  * {} - ${}", service.name, service.price);
            if let Some(description) = &service.description {
                let _ = write!(prompt, " ({})", description);
            }
            prompt.push('\n');
        }
    }

    let _ = write!(prompt, "\nPregunta del visitante: {}", question.trim());
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{ProviderId, ServiceId};
    use crate::domains::providers::ServiceData;
    use chrono::Utc;
    use rust_decimal::Decimal;

    #[test]
    fn test_prompt_lists_providers_and_services() {
        let context = vec![ProviderListing {
            id: ProviderId::new(),
            name: "Snacks Charlitron".into(),
            description: Some("elotes y snacks".into()),
            city: Some("Saltillo".into()),
            category: Some("Comida".into()),
            image_url: None,
            phone: None,
            email: None,
            website: None,
            active: true,
            premium: false,
            featured: true,
            created_at: Utc::now(),
            services: vec![ServiceData {
                id: ServiceId::new(),
                name: "Barra de elotes".into(),
                description: None,
                price: Decimal::new(150000, 2),
            }],
        }];

        let prompt = build_user_prompt(" ¿Quién vende elotes? ", &context);
        assert!(prompt.contains("- Snacks Charlitron (Saltillo) [Comida]: elotes y snacks"));
        assert!(prompt.contains("  * Barra de elotes - $1500.00"));
        assert!(prompt.ends_with("Pregunta del visitante: ¿Quién vende elotes?"));
    }

    #[test]
    fn test_prompt_without_context() {
        let prompt = build_user_prompt("hola", &[]);
        assert!(prompt.contains("(sin proveedores relevantes)"));
    }
}
