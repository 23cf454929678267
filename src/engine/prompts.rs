use std::fmt::Write as _;

use crate::entities::{ClaimReport, MaintenanceReport, RouteRequest, RouteSummary};

pub fn chat(question: &str) -> String {
    format!(
        "You are \"Assistente de Frota IA\", a fleet management specialist. \
         Be friendly, professional and direct, and answer in Brazilian Portuguese. \
         Driver's question: \"{}\"",
        question.trim()
    )
}

pub fn claim(report: &ClaimReport) -> String {
    format!(
        "You are a vehicle damage assessor. Analyse the attached photos of a {model} {year} \
         together with the driver's account: \"{account}\". Price parts and labour for the \
         region of {location}, Brazil, in Brazilian reais (BRL). Reply with JSON only, using \
         the keys: analiseGeral (object with nivelDano, nivelUrgencia, areaVeiculo), \
         descricaoDanos, coerenciaRelato, pecasNecessarias (array of objects with nome and \
         custo), estimativas (object with tempoReparo and custoTotal) and carModel.",
        model = report.model.trim(),
        year = report.year.trim(),
        account = report.driver_report.trim(),
        location = report.location.trim(),
    )
}

pub fn maintenance(report: &MaintenanceReport) -> String {
    format!(
        "You are an experienced mechanic. Vehicle {vehicle} has {km} km. The driver reports: \
         \"{account}\". Reply with JSON only, using the keys: diagnostico_preliminar, \
         componentes_provaveis (array of strings), nivel_urgencia (one of \"Baixa\", \"Média\", \
         \"Alta\", \"Crítica - Parar Imediatamente\") and acao_recomendada. Write the values in \
         Brazilian Portuguese.",
        vehicle = report.vehicle_id.trim(),
        km = report.current_km,
        account = report.driver_report.trim(),
    )
}

pub fn receipt() -> String {
    "You digitise expense receipts for a vehicle fleet. Read the attached receipt photos and \
     reply with JSON only, using the keys: estabelecimento, cnpj, data (ISO 8601), valorTotal \
     (number), moeda, categoria (one of \"combustivel\", \"manutencao\", \"pedagio\", \
     \"estacionamento\", \"alimentacao\", \"outros\"), itens (array of objects with descricao, \
     quantidade and valor) and litros (number, fuel receipts only, otherwise null). Use null \
     for anything that cannot be read."
        .to_string()
}

pub fn route_summary(request: &RouteRequest, route: &RouteSummary) -> String {
    let mut stops = String::new();
    for (index, stop) in request.stops.iter().enumerate() {
        let name = stop.label.as_deref().unwrap_or(&stop.address);
        let _ = write!(stops, "\n{}. {}", index + 1, name);
    }
    if stops.is_empty() {
        stops.push_str(" none");
    }

    format!(
        "Write a short, friendly summary in Brazilian Portuguese for the driver of the planned \
         route \"{name}\". Origin: {origin}. Destination: {destination}. Stops, in order:{stops}\n\
         Total distance: {km:.2} km. Estimated driving time: {minutes} minutes. \
         Reply with the summary text only.",
        name = request.name(),
        origin = request.origin.trim(),
        destination = request.destination.trim(),
        stops = stops,
        km = route.distance_km,
        minutes = route.duration_minutes,
    )
}
