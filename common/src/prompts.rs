//! プロンプト生成モジュール
//!
//! 配点リストから教育的フィードバック用のプロンプトを作る。
//! 製品の表示言語（フランス語）で回答させる。

use crate::grade::{to_millis, Total};

/// 解析用プロンプト生成
///
/// # Arguments
/// * `points` - 入力順の配点
///
/// # Returns
/// 要約依頼のプロンプト文字列
pub fn build_summary_prompt(points: &[f64]) -> String {
    let parts = points
        .iter()
        .enumerate()
        .map(|(i, p)| format!("- Segment {} : {} pt", i + 1, p))
        .collect::<Vec<_>>()
        .join("\n");

    let millis: u64 = points.iter().filter_map(|&p| to_millis(p)).map(u64::from).sum();
    let total = Total::from_millis(millis);

    format!(
        r#"Tu es un conseiller pédagogique qui aide un enseignant à corriger une copie.
Voici les points attribués, segment par segment, dans l'ordre de la correction :
{parts}

Nombre de segments : {count}
Total : {total} pt

Rédige un court retour pédagogique (5 à 8 phrases maximum) :
1. Lecture de la répartition des points (réussites régulières ou ponctuelles).
2. Les points forts visibles.
3. Une recommandation concrète pour progresser.

Réponds en texte simple, avec au plus quelques mots en **gras**, sans tableau ni JSON."#,
        parts = parts,
        count = points.len(),
        total = total,
    )
}
