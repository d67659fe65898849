// ABOUTME: Builds the Portuguese user prompt sent to the LLM for exercise suggestions
// ABOUTME: Four technique sections depending on the whitelist, plus the exact JSON output schema
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt::Write as _;

use crate::models::{
    Difficulty, ExerciseCandidate, SuggestionContext, SuggestionRequest, Technique,
    TechniqueWhitelist, WorkoutGoal,
};

use super::catalog::rule_for;

/// Which technique instructions the prompt carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TechniquePromptMode {
    /// No whitelist and advanced techniques disabled
    None,
    /// No whitelist, advanced techniques optional
    AdvancedOptional,
    /// Whitelist of group techniques only
    OnlyGroups,
    /// Whitelist of single-exercise techniques only
    OnlySingles,
    /// Whitelist mixing both kinds
    Mixed,
}

impl TechniquePromptMode {
    /// Mode for a request
    #[must_use]
    pub fn for_request(request: &SuggestionRequest) -> Self {
        match request.technique_whitelist() {
            Some(whitelist) if whitelist.only_group_techniques() => Self::OnlyGroups,
            Some(whitelist) if whitelist.only_single_techniques() => Self::OnlySingles,
            Some(_) => Self::Mixed,
            None if request.allow_advanced_techniques
                && request.difficulty != Difficulty::Beginner =>
            {
                Self::AdvancedOptional
            }
            None => Self::None,
        }
    }
}

/// Prompt description of a goal
#[must_use]
pub const fn goal_description(goal: WorkoutGoal) -> &'static str {
    match goal {
        WorkoutGoal::Hypertrophy => "hipertrofia (ganho de massa muscular)",
        WorkoutGoal::Strength => "forca maxima",
        WorkoutGoal::FatLoss => "emagrecimento e queima de gordura",
        WorkoutGoal::Endurance => "resistencia muscular",
        WorkoutGoal::Functional => "funcionalidade e mobilidade",
        WorkoutGoal::GeneralFitness => "condicionamento geral",
    }
}

/// Prompt description of a difficulty
#[must_use]
pub const fn difficulty_description(difficulty: Difficulty) -> &'static str {
    match difficulty {
        Difficulty::Beginner => "iniciante (exercicios simples e seguros)",
        Difficulty::Intermediate => "intermediario (exercicios compostos e isolados)",
        Difficulty::Advanced => "avancado (tecnicas avancadas e alta intensidade)",
    }
}

const fn technique_description(technique: Technique) -> &'static str {
    match technique {
        Technique::Normal => "\"normal\": Exercicio padrao (1 exercicio isolado)",
        Technique::Dropset => "\"dropset\": Dropset - reducao de carga sem descanso (1 exercicio)",
        Technique::RestPause => {
            "\"rest_pause\": Rest-pause - pausas curtas de 10-15s (1 exercicio)"
        }
        Technique::Cluster => "\"cluster\": Cluster set - series fracionadas (1 exercicio)",
        Technique::Biset => {
            "\"biset\": Bi-set - EXATAMENTE 2 exercicios do MESMO grupo muscular, sem descanso entre eles"
        }
        Technique::Superset => {
            "\"superset\": Superset - EXATAMENTE 2 exercicios de grupos musculares DIFERENTES (antagonistas), sem descanso entre eles"
        }
        Technique::Triset => {
            "\"triset\": Tri-set - EXATAMENTE 3 exercicios do mesmo grupo muscular, sem descanso entre eles"
        }
        Technique::Giantset => {
            "\"giantset\": Giant set - 4 a 8 exercicios (minimo 4, maximo 8), sem descanso entre eles"
        }
    }
}

/// Technique and group size used when only group techniques are allowed
///
/// Tri-set wins over giant set, which wins over bi-set, then superset.
#[must_use]
pub fn paired_technique(whitelist: &TechniqueWhitelist) -> (Technique, usize) {
    let technique = [
        Technique::Triset,
        Technique::Giantset,
        Technique::Biset,
        Technique::Superset,
    ]
    .into_iter()
    .find(|t| whitelist.contains(*t))
    .unwrap_or(Technique::Biset);

    let size = rule_for(technique).map_or(2, |rule| rule.size.min());
    (technique, size)
}

const QUANTITY_RULES: &str = "REGRAS DE QUANTIDADE POR TECNICA:
- biset: EXATAMENTE 2 exercicios por grupo (mesmo grupo muscular)
- superset: EXATAMENTE 2 exercicios por grupo (grupos musculares diferentes/antagonistas)
- triset: EXATAMENTE 3 exercicios por grupo (mesmo grupo muscular)
- giantset: 4 a 8 exercicios por grupo (MINIMO 4, MAXIMO 8)";

const GROUP_STRUCTURE_RULES: &str = "REGRAS DE ESTRUTURA JSON:
1. Gere um identificador unico para cada grupo (ex: \"group-\" + 8 caracteres)
2. TODOS exercicios do grupo devem ter o MESMO \"exercise_group_id\"
3. Use \"exercise_group_order\": 0 para o primeiro, 1 para o segundo, etc.
4. TODOS exceto o ultimo do grupo: \"rest_seconds\": 0
5. Ultimo exercicio do grupo: \"rest_seconds\": 60-90";

const MUSCLE_RULES: &str = "REGRAS DE GRUPOS MUSCULARES:
- BI-SET: Os 2 exercicios DEVEM ser do MESMO grupo muscular (ex: 2 exercicios de peito)
- SUPERSET: Os 2 exercicios DEVEM ser de grupos antagonistas (peito + costas ou biceps + triceps)
- TRI-SET: Os 3 exercicios DEVEM ser do MESMO grupo muscular (ex: 3 exercicios de biceps)
- GIANT-SET: Os 4+ exercicios podem ser do mesmo ou diferentes grupos";

const GROUP_EXAMPLES: &str = r#"EXEMPLO de bi-set (2 exercicios de peito):
[
  {"exercise_id": "...", "muscle_group": "chest", "technique_type": "biset", "exercise_group_id": "group-abc12345", "exercise_group_order": 0, "rest_seconds": 0},
  {"exercise_id": "...", "muscle_group": "chest", "technique_type": "biset", "exercise_group_id": "group-abc12345", "exercise_group_order": 1, "rest_seconds": 60}
]

EXEMPLO de superset (peito + costas):
[
  {"exercise_id": "...", "muscle_group": "chest", "technique_type": "superset", "exercise_group_id": "group-xyz78901", "exercise_group_order": 0, "rest_seconds": 0},
  {"exercise_id": "...", "muscle_group": "back", "technique_type": "superset", "exercise_group_id": "group-xyz78901", "exercise_group_order": 1, "rest_seconds": 60}
]"#;

const ADVANCED_OPTIONAL_SECTION: &str = r#"TECNICAS AVANCADAS (opcional - use quando apropriado):
Voce pode sugerir tecnicas avancadas para intensificar o treino. Use-as com moderacao.

TIPOS DE TECNICA:
- "normal": Exercicio padrao (default)
- "dropset": Dropset - reducao de carga sem descanso (bom para hipertrofia)
- "rest_pause": Rest-pause - pausas curtas de 10-15s entre mini-series
- "cluster": Cluster set - series fracionadas com descanso intra-serie
- "isometric": Isometrico - pausa estatica em um ponto do movimento
- "biset": Bi-set - dois exercicios do mesmo grupo muscular sem descanso
- "superset": Superset - dois exercicios de grupos antagonistas sem descanso
- "triset": Tri-set - tres exercicios do mesmo grupo muscular sem descanso
- "giantset": Giant set - quatro a oito exercicios sem descanso

REGRAS PARA TECNICAS:
1. Para biset/superset/triset/giantset: agrupe exercicios consecutivos usando o mesmo "exercise_group_id"
2. Dentro do grupo, use "exercise_group_order" para indicar a ordem (0, 1, 2...)
3. Use "execution_instructions" para instrucoes especificas da tecnica
4. Para isometric, defina "isometric_seconds" (ex: 3-5 segundos)
5. Nao use tecnicas avancadas para TODOS os exercicios - apenas 1-2 por treino
6. Dropset e rest-pause sao bons para o ULTIMO exercicio de cada grupo muscular"#;

const OUTPUT_SCHEMA: &str = r#"Responda APENAS com um JSON valido no formato:
{
  "suggestions": [
    {
      "exercise_id": "id-do-exercicio",
      "name": "Nome do Exercicio",
      "muscle_group": "grupo_muscular",
      "sets": 3,
      "reps": "10-12",
      "rest_seconds": 60,
      "order": 0,
      "reason": "Motivo da escolha",
      "technique_type": "normal",
      "exercise_group_id": null,
      "exercise_group_order": 0,
      "execution_instructions": null,
      "isometric_seconds": null
    }
  ],
  "message": "Dica geral sobre o treino"
}"#;

fn allowed_list(whitelist: &TechniqueWhitelist) -> String {
    whitelist
        .iter()
        .map(|t| format!("- {}", technique_description(t)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Technique instructions for a request, empty when none apply
#[must_use]
pub fn technique_section(request: &SuggestionRequest) -> String {
    let mode = TechniquePromptMode::for_request(request);
    let Some(whitelist) = request.technique_whitelist() else {
        return if mode == TechniquePromptMode::AdvancedOptional {
            ADVANCED_OPTIONAL_SECTION.to_owned()
        } else {
            String::new()
        };
    };

    let allowed = allowed_list(whitelist);
    match mode {
        TechniquePromptMode::OnlyGroups => {
            let (_, group_size) = paired_technique(whitelist);
            let group_count = request.clamped_count() / group_size;
            format!(
                "TECNICAS PERMITIDAS (OBRIGATORIO usar APENAS estas):\n{allowed}\n\n\
                 REGRAS CRITICAS - LEIA COM ATENCAO:\n\
                 1. NAO crie exercicios com technique_type \"normal\" - TODOS devem usar as tecnicas permitidas\n\
                 2. Voce DEVE criar EXATAMENTE {group_count} grupos de {group_size} exercicios cada\n\n\
                 {QUANTITY_RULES}\n\n{MUSCLE_RULES}\n\n{GROUP_STRUCTURE_RULES}\n\n{GROUP_EXAMPLES}"
            )
        }
        TechniquePromptMode::OnlySingles => format!(
            "TECNICAS PERMITIDAS (use APENAS estas):\n{allowed}\n\n\
             IMPORTANTE: Todas as tecnicas permitidas sao de exercicio unico. NAO agrupe exercicios: \
             use \"exercise_group_id\": null e \"exercise_group_order\": 0 em todos eles."
        ),
        _ => format!(
            "TECNICAS PERMITIDAS (use APENAS estas):\n{allowed}\n\n\
             IMPORTANTE: Voce DEVE usar SOMENTE as tecnicas listadas acima. NAO use outras tecnicas.\n\n\
             {QUANTITY_RULES}\n\n{MUSCLE_RULES}\n\n{GROUP_STRUCTURE_RULES}"
        ),
    }
}

fn context_section(context: &SuggestionContext) -> String {
    let mut parts: Vec<String> = Vec::new();
    if let Some(name) = context.plan_name.as_deref() {
        parts.push(format!("PLANO: {name}"));
    }
    if let Some(goal) = context.plan_goal.as_deref() {
        parts.push(format!("OBJETIVO DO PLANO: {goal}"));
    }
    if let Some(name) = context.workout_name.as_deref() {
        parts.push(format!("TREINO: {name}"));
    }
    if let Some(label) = context.workout_label.as_deref() {
        parts.push(format!("LABEL: {label}"));
    }
    if let Some(split) = context.plan_split_type.as_deref() {
        parts.push(format!("DIVISAO: {split}"));
    }
    if !context.existing_exercises.is_empty() {
        parts.push(format!(
            "EXERCICIOS JA NO TREINO: {}",
            context.existing_exercises.join(", ")
        ));
    }
    if let Some(count) = context.existing_exercise_count {
        parts.push(format!("TOTAL DE EXERCICIOS JA NO TREINO: {count}"));
    }

    if parts.is_empty() {
        String::new()
    } else {
        format!("\nCONTEXTO DO TREINO:\n{}\n", parts.join("\n"))
    }
}

/// Full user prompt for a suggestion request
///
/// Lists at most `candidate_limit` candidates.
#[must_use]
pub fn build_suggestion_prompt(
    candidates: &[ExerciseCandidate],
    request: &SuggestionRequest,
    candidate_limit: usize,
) -> String {
    let mut exercise_list = String::new();
    for candidate in candidates.iter().take(candidate_limit) {
        let _ = writeln!(
            exercise_list,
            "- ID: {}, Nome: {}, Grupo: {}",
            candidate.id, candidate.name, candidate.muscle_group
        );
    }

    let context = request
        .context
        .as_ref()
        .map(context_section)
        .unwrap_or_default();

    let techniques = technique_section(request);
    let techniques = if techniques.is_empty() {
        techniques
    } else {
        format!("\n{techniques}\n")
    };

    format!(
        "Voce e um personal trainer experiente. Selecione os {count} melhores exercicios para um treino com as seguintes caracteristicas:\n\n\
         OBJETIVO: {goal}\n\
         NIVEL: {difficulty}\n\
         GRUPOS MUSCULARES: {muscles}\n\
         {context}\n\
         EXERCICIOS DISPONIVEIS:\n\
         {exercise_list}\n\
         REGRAS GERAIS:\n\
         1. Selecione exercicios variados que trabalhem os grupos musculares solicitados\n\
         2. Comece com exercicios compostos e termine com isolados\n\
         3. Configure series, repeticoes e descanso apropriados para o objetivo\n\
         4. Para hipertrofia: 3-4 series, 8-12 reps, 60-90s descanso\n\
         5. Para forca: 4-5 series, 3-6 reps, 120-180s descanso\n\
         6. Para emagrecimento: 3 series, 12-15 reps, 30-45s descanso\n\
         7. Para resistencia: 2-3 series, 15-20 reps, 30s descanso\n\
         8. Considere os exercicios ja existentes no treino para evitar redundancia\n\
         {techniques}\n\
         {OUTPUT_SCHEMA}",
        count = request.clamped_count(),
        goal = goal_description(request.goal),
        difficulty = difficulty_description(request.difficulty),
        muscles = request.muscle_groups.join(", "),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> SuggestionRequest {
        SuggestionRequest::new(
            ["chest", "back"],
            WorkoutGoal::Hypertrophy,
            Difficulty::Advanced,
            6,
        )
    }

    #[test]
    fn test_prompt_modes() {
        assert_eq!(
            TechniquePromptMode::for_request(&request()),
            TechniquePromptMode::AdvancedOptional
        );
        assert_eq!(
            TechniquePromptMode::for_request(&request().with_advanced_techniques(false)),
            TechniquePromptMode::None
        );
        assert_eq!(
            TechniquePromptMode::for_request(&request().with_allowed_techniques(["superset"])),
            TechniquePromptMode::OnlyGroups
        );
        assert_eq!(
            TechniquePromptMode::for_request(&request().with_allowed_techniques(["dropset"])),
            TechniquePromptMode::OnlySingles
        );
        assert_eq!(
            TechniquePromptMode::for_request(
                &request().with_allowed_techniques(["biset", "dropset"])
            ),
            TechniquePromptMode::Mixed
        );
    }

    #[test]
    fn test_only_group_section_states_group_count() {
        let section = technique_section(&request().with_allowed_techniques(["triset", "biset"]));
        assert!(section.contains("EXATAMENTE 2 grupos de 3 exercicios"));
    }

    #[test]
    fn test_prompt_caps_candidate_list() {
        let candidates: Vec<ExerciseCandidate> = (0..80)
            .map(|i| ExerciseCandidate::new(format!("ex-{i}"), format!("Exercicio {i}"), "chest"))
            .collect();
        let prompt = build_suggestion_prompt(&candidates, &request(), 50);
        assert!(prompt.contains("ID: ex-49,"));
        assert!(!prompt.contains("ID: ex-50,"));
        assert!(prompt.contains("\"suggestions\""));
        assert!(prompt.contains("GRUPOS MUSCULARES: chest, back"));
    }

    #[test]
    fn test_paired_technique_priority() {
        let whitelist = TechniqueWhitelist::from_names(["superset", "giantset"]);
        assert_eq!(paired_technique(&whitelist), (Technique::Giantset, 4));
        let whitelist = TechniqueWhitelist::from_names(["superset"]);
        assert_eq!(paired_technique(&whitelist), (Technique::Superset, 2));
    }
}
