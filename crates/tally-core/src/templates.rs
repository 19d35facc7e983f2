//! Curated classification templates for household spending categories
//!
//! Each template maps literal name fragments (lower-case, Portuguese, with
//! accents) to a canonical distribution, flag set and rationale. The registry
//! is an ordered slice: the classifier walks it front to back and the first
//! matching template wins, so both template order and pattern order matter.

use serde::Serialize;

use crate::energy::EnergyDistribution;
use crate::validation::SemanticFlags;

/// A code-defined classification rule
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CategoryEnergyTemplate {
    /// Stable identifier reported as `template_name`
    pub name: &'static str,
    /// Name fragments matched against category names
    pub patterns: &'static [&'static str],
    pub distribution: EnergyDistribution,
    pub flags: SemanticFlags,
    /// Rationale copied verbatim into classification results
    pub justification: &'static str,
}

/// Look up a template by identifier
pub fn find(name: &str) -> Option<&'static CategoryEnergyTemplate> {
    TEMPLATES.iter().find(|t| t.name == name)
}

const fn dist(survival: f64, choice: f64, future: f64, loss: f64) -> EnergyDistribution {
    EnergyDistribution::new(survival, choice, future, loss)
}

const fn flags(is_fixed: bool, is_essential: bool, is_investment: bool) -> SemanticFlags {
    SemanticFlags::new(is_fixed, is_essential, is_investment)
}

pub static TEMPLATES: &[CategoryEnergyTemplate] = &[
    // =========================================================================
    // Housing - 100% survival, essential and fixed
    // =========================================================================
    CategoryEnergyTemplate {
        name: "ALUGUEL",
        patterns: &["aluguel", "financiamento imóvel", "financiamento casa", "parcela imóvel"],
        distribution: dist(1.0, 0.0, 0.0, 0.0),
        flags: flags(true, true, false),
        justification: "Housing is an essential fixed cost - 100% Survival",
    },
    CategoryEnergyTemplate {
        name: "CONDOMINIO_IPTU",
        patterns: &["condomínio", "condominio", "iptu", "taxa condominial"],
        distribution: dist(1.0, 0.0, 0.0, 0.0),
        flags: flags(true, true, false),
        justification: "Mandatory housing fees - 100% Survival",
    },
    CategoryEnergyTemplate {
        name: "ENERGIA_ELETRICA",
        patterns: &[
            "energia",
            "luz",
            "eletricidade",
            "conta de luz",
            "cemig",
            "enel",
            "cpfl",
            "light",
        ],
        distribution: dist(1.0, 0.0, 0.0, 0.0),
        flags: flags(true, true, false),
        justification: "Electricity is essential for modern life - 100% Survival",
    },
    CategoryEnergyTemplate {
        name: "AGUA",
        patterns: &["água", "agua", "saneamento", "copasa", "sabesp", "cedae"],
        distribution: dist(1.0, 0.0, 0.0, 0.0),
        flags: flags(true, true, false),
        justification: "Water is a basic need - 100% Survival",
    },
    CategoryEnergyTemplate {
        name: "GAS",
        patterns: &["gás", "gas", "botijão", "encanado"],
        distribution: dist(1.0, 0.0, 0.0, 0.0),
        flags: flags(true, true, false),
        justification: "Cooking gas - 100% Survival",
    },
    CategoryEnergyTemplate {
        name: "MANUTENCAO_CASA",
        patterns: &["manutenção casa", "reparo", "conserto", "reforma"],
        distribution: dist(0.8, 0.2, 0.0, 0.0),
        flags: flags(false, false, false),
        justification: "Basic upkeep is survival, cosmetic renovation is choice",
    },
    // =========================================================================
    // Food - survival/choice mix
    // =========================================================================
    CategoryEnergyTemplate {
        name: "SUPERMERCADO",
        patterns: &["supermercado", "mercado", "feira", "hortifruti", "açougue", "padaria"],
        distribution: dist(0.7, 0.3, 0.0, 0.0),
        flags: flags(false, true, false),
        justification: "Basic groceries are essential (70%), extras are choice (30%)",
    },
    CategoryEnergyTemplate {
        name: "RESTAURANTE",
        patterns: &["restaurante", "lanchonete", "delivery", "ifood", "rappi", "uber eats"],
        distribution: dist(0.0, 1.0, 0.0, 0.0),
        flags: flags(false, false, false),
        justification: "Eating out is a comfort choice - 100% Choice",
    },
    CategoryEnergyTemplate {
        name: "CAFE_LANCHES",
        patterns: &["café", "cafe", "lanche", "starbucks", "cafeteria"],
        distribution: dist(0.0, 1.0, 0.0, 0.0),
        flags: flags(false, false, false),
        justification: "Coffee and snacks are pleasure choices - 100% Choice",
    },
    CategoryEnergyTemplate {
        name: "BEBIDAS",
        patterns: &["bebidas", "bar", "cerveja", "vinho", "drinks"],
        distribution: dist(0.0, 1.0, 0.0, 0.0),
        flags: flags(false, false, false),
        justification: "Alcoholic drinks are a choice - 100% Choice",
    },
    // =========================================================================
    // Transport - survival/choice mix
    // =========================================================================
    CategoryEnergyTemplate {
        name: "COMBUSTIVEL",
        patterns: &["combustível", "combustivel", "gasolina", "etanol", "diesel", "posto"],
        distribution: dist(0.8, 0.2, 0.0, 0.0),
        flags: flags(false, true, false),
        justification: "Commuting is essential (80%), leisure driving is choice (20%)",
    },
    CategoryEnergyTemplate {
        name: "TRANSPORTE_PUBLICO",
        patterns: &[
            "transporte público",
            "ônibus",
            "onibus",
            "metrô",
            "metro",
            "trem",
            "passagem",
        ],
        distribution: dist(1.0, 0.0, 0.0, 0.0),
        flags: flags(true, true, false),
        justification: "Public transport to work - 100% Survival",
    },
    CategoryEnergyTemplate {
        name: "UBER_TAXI",
        patterns: &["uber", "taxi", "táxi", "99", "cabify", "app transporte"],
        distribution: dist(0.3, 0.7, 0.0, 0.0),
        flags: flags(false, false, false),
        justification: "Ride apps: emergencies are survival, convenience is choice",
    },
    CategoryEnergyTemplate {
        name: "ESTACIONAMENTO",
        patterns: &["estacionamento", "parking", "zona azul"],
        distribution: dist(0.5, 0.5, 0.0, 0.0),
        flags: flags(false, false, false),
        justification: "Parking: for work it is survival, for leisure it is choice",
    },
    CategoryEnergyTemplate {
        name: "MANUTENCAO_VEICULO",
        patterns: &[
            "manutenção veículo",
            "mecânico",
            "oficina",
            "troca óleo",
            "revisão carro",
        ],
        distribution: dist(0.8, 0.2, 0.0, 0.0),
        flags: flags(false, true, false),
        justification: "Preventive maintenance is essential, customization is choice",
    },
    CategoryEnergyTemplate {
        name: "SEGURO_VEICULO",
        patterns: &[
            "seguro carro",
            "seguro auto",
            "seguro veículo",
            "dpvat",
            "licenciamento",
        ],
        distribution: dist(0.9, 0.1, 0.0, 0.0),
        flags: flags(true, true, false),
        justification: "Mandatory insurance and registration - mostly Survival",
    },
    // =========================================================================
    // Health - survival
    // =========================================================================
    CategoryEnergyTemplate {
        name: "PLANO_SAUDE",
        patterns: &[
            "plano de saúde",
            "plano saude",
            "convênio",
            "unimed",
            "amil",
            "bradesco saúde",
            "sulamerica",
        ],
        distribution: dist(1.0, 0.0, 0.0, 0.0),
        flags: flags(true, true, false),
        justification: "Health insurance is essential protection - 100% Survival",
    },
    CategoryEnergyTemplate {
        name: "MEDICAMENTOS",
        patterns: &["medicamento", "remédio", "farmácia", "drogaria", "receita médica"],
        distribution: dist(1.0, 0.0, 0.0, 0.0),
        flags: flags(false, true, false),
        justification: "Medication is a health need - 100% Survival",
    },
    CategoryEnergyTemplate {
        name: "CONSULTAS",
        patterns: &["consulta", "médico", "médica", "exame", "clínica", "hospital"],
        distribution: dist(1.0, 0.0, 0.0, 0.0),
        flags: flags(false, true, false),
        justification: "Medical appointments are essential care - 100% Survival",
    },
    CategoryEnergyTemplate {
        name: "ODONTOLOGIA",
        patterns: &["dentista", "odonto", "ortodontia", "tratamento dental"],
        distribution: dist(0.8, 0.2, 0.0, 0.0),
        flags: flags(false, true, false),
        justification: "Oral health is essential (80%), cosmetic dentistry is choice (20%)",
    },
    // =========================================================================
    // Education - survival/future mix
    // =========================================================================
    CategoryEnergyTemplate {
        name: "MENSALIDADE_ESCOLA",
        patterns: &["escola", "colégio", "mensalidade escolar", "material escolar"],
        distribution: dist(0.6, 0.0, 0.4, 0.0),
        flags: flags(true, true, true),
        justification: "Basic schooling is essential and an investment in the future",
    },
    CategoryEnergyTemplate {
        name: "FACULDADE",
        patterns: &[
            "faculdade",
            "universidade",
            "graduação",
            "pós-graduação",
            "mestrado",
            "doutorado",
        ],
        distribution: dist(0.3, 0.0, 0.7, 0.0),
        flags: flags(true, false, true),
        justification: "Higher education is mainly an investment in the future",
    },
    CategoryEnergyTemplate {
        name: "CURSOS",
        patterns: &["curso", "treinamento", "workshop", "capacitação", "certificação"],
        distribution: dist(0.0, 0.2, 0.8, 0.0),
        flags: flags(false, false, true),
        justification: "Courses are an investment in professional growth",
    },
    CategoryEnergyTemplate {
        name: "LIVROS",
        patterns: &["livro", "ebook", "material didático", "apostila"],
        distribution: dist(0.0, 0.3, 0.7, 0.0),
        flags: flags(false, false, true),
        justification: "Books: leisure reading is choice, knowledge is investment",
    },
    // =========================================================================
    // Leisure and entertainment - choice
    // =========================================================================
    CategoryEnergyTemplate {
        name: "STREAMING",
        patterns: &[
            "netflix",
            "amazon prime",
            "disney",
            "hbo",
            "spotify",
            "deezer",
            "youtube premium",
            "streaming",
            "tv/streaming",
        ],
        distribution: dist(0.0, 1.0, 0.0, 0.0),
        flags: flags(true, false, false),
        justification: "Streaming services are entertainment - 100% Choice",
    },
    CategoryEnergyTemplate {
        name: "INTERNET",
        patterns: &["internet", "banda larga", "fibra", "provedor"],
        distribution: dist(0.7, 0.3, 0.0, 0.0),
        flags: flags(true, true, false),
        justification: "Internet: work and study are survival, entertainment is choice",
    },
    CategoryEnergyTemplate {
        name: "CINEMA_TEATRO",
        patterns: &["cinema", "teatro", "show", "ingresso", "espetáculo"],
        distribution: dist(0.0, 1.0, 0.0, 0.0),
        flags: flags(false, false, false),
        justification: "Cultural entertainment - 100% Choice",
    },
    CategoryEnergyTemplate {
        name: "GAMES",
        patterns: &["game", "jogo", "playstation", "xbox", "nintendo", "steam"],
        distribution: dist(0.0, 1.0, 0.0, 0.0),
        flags: flags(false, false, false),
        justification: "Games are leisure - 100% Choice",
    },
    CategoryEnergyTemplate {
        name: "VIAGENS",
        patterns: &["viagem", "passagem aérea", "hotel", "hospedagem", "airbnb", "turismo"],
        distribution: dist(0.0, 1.0, 0.0, 0.0),
        flags: flags(false, false, false),
        justification: "Leisure travel is a choice - 100% Choice",
    },
    CategoryEnergyTemplate {
        name: "FESTAS",
        patterns: &["festa", "evento", "balada", "happy hour"],
        distribution: dist(0.0, 1.0, 0.0, 0.0),
        flags: flags(false, false, false),
        justification: "Parties and social events - 100% Choice",
    },
    // =========================================================================
    // Bills and services - mix
    // =========================================================================
    CategoryEnergyTemplate {
        name: "CELULAR",
        patterns: &["celular", "telefone", "operadora", "vivo", "claro", "tim", "oi"],
        distribution: dist(0.7, 0.3, 0.0, 0.0),
        flags: flags(true, true, false),
        justification: "Basic communication is essential, extra data is choice",
    },
    CategoryEnergyTemplate {
        name: "SEGUROS",
        patterns: &["seguro vida", "seguro residencial", "seguro"],
        distribution: dist(0.9, 0.1, 0.0, 0.0),
        flags: flags(true, true, false),
        justification: "Insurance is essential protection - 90% Survival",
    },
    // =========================================================================
    // Clothing and beauty - mostly choice
    // =========================================================================
    CategoryEnergyTemplate {
        name: "ROUPAS",
        patterns: &["roupa", "vestuário", "loja roupa", "shopping"],
        distribution: dist(0.2, 0.8, 0.0, 0.0),
        flags: flags(false, false, false),
        justification: "Basic clothing is survival (20%), fashion is choice (80%)",
    },
    CategoryEnergyTemplate {
        name: "CALCADOS",
        patterns: &["calçado", "sapato", "tênis", "chinelo"],
        distribution: dist(0.3, 0.7, 0.0, 0.0),
        flags: flags(false, false, false),
        justification: "Basic footwear is survival, fashion is choice",
    },
    CategoryEnergyTemplate {
        name: "COSMETICOS",
        patterns: &["cosmético", "maquiagem", "perfume", "beleza"],
        distribution: dist(0.0, 1.0, 0.0, 0.0),
        flags: flags(false, false, false),
        justification: "Cosmetics are an aesthetic choice - 100% Choice",
    },
    CategoryEnergyTemplate {
        name: "SALAO",
        patterns: &["salão", "barbearia", "cabelo", "unha", "manicure"],
        distribution: dist(0.2, 0.8, 0.0, 0.0),
        flags: flags(false, false, false),
        justification: "A basic haircut is survival, treatments are choice",
    },
    // =========================================================================
    // Wellness - choice with a future component
    // =========================================================================
    CategoryEnergyTemplate {
        name: "ACADEMIA",
        patterns: &["academia", "musculação", "crossfit", "smart fit", "bluefit"],
        distribution: dist(0.0, 0.6, 0.4, 0.0),
        flags: flags(true, false, true),
        justification: "Exercise is a health choice with investment in future well-being",
    },
    CategoryEnergyTemplate {
        name: "YOGA_PILATES",
        patterns: &["yoga", "pilates", "meditação"],
        distribution: dist(0.0, 0.6, 0.4, 0.0),
        flags: flags(false, false, true),
        justification: "Mental and physical well-being practices",
    },
    CategoryEnergyTemplate {
        name: "SPA",
        patterns: &["spa", "massagem", "relaxamento"],
        distribution: dist(0.0, 1.0, 0.0, 0.0),
        flags: flags(false, false, false),
        justification: "Spa and massages are comfort choices - 100% Choice",
    },
    // =========================================================================
    // Pets - survival/choice mix
    // =========================================================================
    CategoryEnergyTemplate {
        name: "PETS",
        patterns: &[
            "pet",
            "cachorro",
            "gato",
            "ração",
            "veterinário",
            "petshop",
            "banho tosa",
        ],
        distribution: dist(0.6, 0.4, 0.0, 0.0),
        flags: flags(false, false, false),
        justification: "Basic pet care is survival, extras are choice",
    },
    // =========================================================================
    // Family
    // =========================================================================
    CategoryEnergyTemplate {
        name: "CRECHE",
        patterns: &["creche", "babá", "cuidador", "berçário"],
        distribution: dist(1.0, 0.0, 0.0, 0.0),
        flags: flags(true, true, false),
        justification: "Childcare is essential to be able to work - 100% Survival",
    },
    CategoryEnergyTemplate {
        name: "PRESENTES",
        patterns: &["presente", "aniversário", "natal", "dia das mães", "dia dos pais"],
        distribution: dist(0.0, 1.0, 0.0, 0.0),
        flags: flags(false, false, false),
        justification: "Gifts are social expression - 100% Choice",
    },
    CategoryEnergyTemplate {
        name: "MESADA",
        patterns: &["mesada", "dinheiro filho"],
        distribution: dist(0.0, 0.3, 0.7, 0.0),
        flags: flags(false, false, true),
        justification: "Allowance is financial education - mostly Future",
    },
    // =========================================================================
    // Investments and savings - future
    // =========================================================================
    CategoryEnergyTemplate {
        name: "INVESTIMENTOS",
        patterns: &[
            "investimento",
            "ação",
            "fundo",
            "cdb",
            "tesouro",
            "lci",
            "lca",
            "cri",
            "cra",
        ],
        distribution: dist(0.0, 0.0, 1.0, 0.0),
        flags: flags(false, false, true),
        justification: "Investments are 100% Future",
    },
    CategoryEnergyTemplate {
        name: "POUPANCA",
        patterns: &["poupança", "reserva", "emergência"],
        distribution: dist(0.0, 0.0, 1.0, 0.0),
        flags: flags(false, false, true),
        justification: "Savings build a reserve - 100% Future",
    },
    CategoryEnergyTemplate {
        name: "PREVIDENCIA",
        patterns: &["previdência", "aposentadoria", "pgbl", "vgbl"],
        distribution: dist(0.0, 0.0, 1.0, 0.0),
        flags: flags(true, false, true),
        justification: "Pension plans are long-term planning - 100% Future",
    },
    CategoryEnergyTemplate {
        name: "CRIPTO",
        patterns: &["cripto", "bitcoin", "ethereum", "criptomoeda"],
        distribution: dist(0.0, 0.2, 0.8, 0.0),
        flags: flags(false, false, true),
        justification: "Crypto: speculation is choice, investment is future",
    },
    // =========================================================================
    // Lost energy - loss
    // =========================================================================
    CategoryEnergyTemplate {
        name: "JUROS_CARTAO",
        patterns: &["juros cartão", "juros crédito", "rotativo", "encargos"],
        distribution: dist(0.0, 0.0, 0.0, 1.0),
        flags: flags(false, false, false),
        justification: "Card interest is money lost - 100% Loss",
    },
    CategoryEnergyTemplate {
        name: "MULTAS",
        patterns: &["multa", "infração", "penalidade"],
        distribution: dist(0.0, 0.0, 0.0, 1.0),
        flags: flags(false, false, false),
        justification: "Fines are an avoidable loss - 100% Loss",
    },
    CategoryEnergyTemplate {
        name: "TAXAS_BANCARIAS",
        patterns: &[
            "taxa bancária",
            "tarifa bancária",
            "ted",
            "doc",
            "saque",
            "taxa manutenção",
        ],
        distribution: dist(0.0, 0.0, 0.0, 1.0),
        flags: flags(false, false, false),
        justification: "Avoidable bank fees are a loss - 100% Loss",
    },
    CategoryEnergyTemplate {
        name: "ANUIDADE_CARTAO",
        patterns: &["anuidade", "anuidade cartão"],
        distribution: dist(0.0, 0.0, 0.0, 1.0),
        flags: flags(true, false, false),
        justification: "Card annual fees are an avoidable cost - 100% Loss",
    },
    CategoryEnergyTemplate {
        name: "CHEQUE_ESPECIAL",
        patterns: &["cheque especial", "limite conta", "descoberto"],
        distribution: dist(0.0, 0.0, 0.0, 1.0),
        flags: flags(false, false, false),
        justification: "Overdraft carries extreme interest - 100% Loss",
    },
    CategoryEnergyTemplate {
        name: "EMPRESTIMO",
        patterns: &[
            "empréstimo pessoal",
            "consignado",
            "crédito pessoal",
            "financeira",
        ],
        distribution: dist(0.0, 0.0, 0.0, 1.0),
        flags: flags(true, false, false),
        justification: "Loan interest is lost energy - 100% Loss",
    },
];
