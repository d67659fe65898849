// ABOUTME: Portuguese prompt for full training plan generation
// ABOUTME: Trainee profile, suggested split, injuries, difficulty-based technique block, JSON schema
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt::Write;

use crate::models::{Difficulty, ExerciseCandidate, PlanRequest, SplitType};
use crate::suggestions::prompt::goal_description;

const fn plan_difficulty_description(difficulty: Difficulty) -> &'static str {
    match difficulty {
        Difficulty::Beginner => "iniciante (exercicios simples, sem tecnicas avancadas)",
        Difficulty::Intermediate => "intermediario (exercicios compostos, tecnicas moderadas)",
        Difficulty::Advanced => "avancado (tecnicas avancadas como dropset, bi-set, rest-pause)",
    }
}

const INTERMEDIATE_TECHNIQUES: &str = r#"
TECNICAS AVANCADAS - OBRIGATORIO usar pelo menos 1-2 tecnicas por treino:
- "dropset": Reducao de carga sem descanso (use no ultimo exercicio de cada grupo muscular)
- "rest_pause": Pausas curtas de 10-15s entre mini-series
- "biset": Bi-set - 2 exercicios consecutivos do MESMO grupo muscular SEM descanso entre eles

COMO CRIAR BI-SET:
1. Gere um identificador unico para o grupo (ex: "group-123")
2. Ambos exercicios devem ter o MESMO "exercise_group_id": "group-123"
3. Use "exercise_group_order": 0 para o primeiro, 1 para o segundo
4. Primeiro exercicio: "rest_seconds": 0
5. Segundo exercicio: "rest_seconds": 60-90
6. Ambos devem ter "technique_type": "biset"
"#;

const ADVANCED_TECHNIQUES: &str = r#"
TECNICAS AVANCADAS - OBRIGATORIO usar 2-4 tecnicas por treino para nivel avancado:

TECNICAS DISPONIVEIS:
- "dropset": Reducao de carga sem descanso (OBRIGATORIO em pelo menos 1 exercicio por treino)
- "rest_pause": Pausas curtas de 10-15s entre mini-series
- "biset": Bi-set - 2 exercicios consecutivos do MESMO grupo muscular sem descanso
- "superset": Superset - 2 exercicios de grupos ANTAGONISTAS (peito/costas, biceps/triceps) sem descanso
- "triset": Tri-set - 3 exercicios consecutivos do mesmo grupo muscular sem descanso
- "giantset": Giant set - 4 a 8 exercicios consecutivos sem descanso

COMO CRIAR BI-SET/TRI-SET/GIANT-SET:
1. Gere um identificador unico para o grupo (ex: "group-abc-123")
2. TODOS exercicios do grupo devem ter o MESMO "exercise_group_id"
3. Use "exercise_group_order": 0, 1, 2... para cada exercicio
4. TODOS exceto o ultimo: "rest_seconds": 0
5. Ultimo do grupo: "rest_seconds": 60-90

ISOMETRIA (opcional):
- Use "isometric_seconds": 3-7 para pausas isometricas
- Combine com "technique_type": "normal"

IMPORTANTE: Para nivel AVANCADO, CADA treino DEVE ter pelo menos:
- 1 dropset no ultimo exercicio de um grupo muscular
- 1 bi-set ou tri-set
"#;

const PLAN_OUTPUT_SCHEMA: &str = r#"Responda APENAS com um JSON valido no formato:
{
  "name": "Nome do Plano",
  "description": "Descricao breve do plano",
  "workouts": [
    {
      "label": "A",
      "name": "Treino A - Peito e Triceps",
      "order": 0,
      "target_muscles": ["chest", "triceps"],
      "exercises": [
        {
          "exercise_id": "id-do-exercicio",
          "sets": 4,
          "reps": "8-12",
          "rest_seconds": 60,
          "order": 0,
          "reason": "Motivo da escolha",
          "technique_type": "normal",
          "exercise_group_id": null,
          "exercise_group_order": 0,
          "execution_instructions": null,
          "isometric_seconds": null
        }
      ]
    }
  ],
  "message": "Dica geral sobre o plano"
}"#;

/// Build the user prompt for a plan request
#[must_use]
pub fn build_plan_prompt(
    candidates: &[ExerciseCandidate],
    request: &PlanRequest,
    candidate_limit: usize,
) -> String {
    let days = request.days_per_week;
    let mut prompt = String::from(
        "Voce e um personal trainer experiente. Crie um plano de treino COMPLETO com as seguintes caracteristicas:\n\n",
    );

    let _ = writeln!(prompt, "OBJETIVO: {}", goal_description(request.goal));
    let _ = writeln!(prompt, "NIVEL: {}", plan_difficulty_description(request.difficulty));
    let _ = writeln!(prompt, "DIAS POR SEMANA: {days}");
    let _ = writeln!(prompt, "DURACAO POR SESSAO: {} minutos", request.minutes_per_session);
    let _ = writeln!(prompt, "EQUIPAMENTO: {}", request.equipment);
    let _ = writeln!(prompt, "PREFERENCIA: {}", request.preferences);
    let _ = writeln!(prompt, "DURACAO DO PLANO: {} semanas", request.duration_weeks);
    let _ = writeln!(prompt, "DIVISAO SUGERIDA: {}", SplitType::prompt_hint(days));
    if !request.injuries.is_empty() {
        let _ = writeln!(
            prompt,
            "LESOES/RESTRICOES: {} - EVITE exercicios que afetem essas areas!",
            request.injuries.join(", ")
        );
    }

    prompt.push_str("\nEXERCICIOS DISPONIVEIS:\n");
    for candidate in candidates.iter().take(candidate_limit) {
        let _ = writeln!(
            prompt,
            "- ID: {}, Nome: {}, Grupo: {}",
            candidate.id, candidate.name, candidate.muscle_group
        );
    }

    match request.difficulty {
        Difficulty::Beginner => {}
        Difficulty::Intermediate => prompt.push_str(INTERMEDIATE_TECHNIQUES),
        Difficulty::Advanced => prompt.push_str(ADVANCED_TECHNIQUES),
    }

    let _ = write!(
        prompt,
        "\nREGRAS GERAIS:\n\
         1. Crie exatamente {days} treinos diferentes\n\
         2. Cada treino deve ter 4-8 exercicios (dependendo do tempo disponivel)\n\
         3. Distribua os grupos musculares de forma inteligente pela semana\n\
         4. Comece cada treino com exercicios compostos, termine com isolados\n\
         5. Configure series, repeticoes e descanso apropriados para o objetivo:\n   \
         - Hipertrofia: 3-4 series, 8-12 reps, 60-90s descanso\n   \
         - Forca: 4-5 series, 3-6 reps, 120-180s descanso\n   \
         - Emagrecimento: 3 series, 12-15 reps, 30-45s descanso\n   \
         - Resistencia: 2-3 series, 15-20 reps, 30s descanso\n\
         6. NAO repita exercicios entre treinos (use variedade)\n\
         7. Use apenas IDs de exercicios da lista fornecida\n\n"
    );
    prompt.push_str(PLAN_OUTPUT_SCHEMA);
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WorkoutGoal;

    #[test]
    fn test_prompt_lists_capped_candidates_and_injuries() {
        let candidates: Vec<ExerciseCandidate> = (0..5)
            .map(|i| ExerciseCandidate::new(format!("e{i}"), format!("Exercicio {i}"), "chest"))
            .collect();
        let request = PlanRequest::new(WorkoutGoal::Strength, Difficulty::Beginner, 4, 60)
            .with_injuries(["knee"]);
        let prompt = build_plan_prompt(&candidates, &request, 3);

        assert!(prompt.contains("- ID: e2, Nome: Exercicio 2, Grupo: chest"));
        assert!(!prompt.contains("ID: e3"));
        assert!(prompt.contains("LESOES/RESTRICOES: knee"));
        assert!(prompt.contains("DIVISAO SUGERIDA: Upper/Lower (superior/inferior)"));
        assert!(prompt.contains("Crie exatamente 4 treinos diferentes"));
        assert!(!prompt.contains("TECNICAS AVANCADAS"));
    }

    #[test]
    fn test_advanced_prompt_has_technique_block() {
        let request = PlanRequest::new(WorkoutGoal::Hypertrophy, Difficulty::Advanced, 3, 60);
        let prompt = build_plan_prompt(&[], &request, 100);
        assert!(prompt.contains("OBRIGATORIO usar 2-4 tecnicas"));
    }
}
