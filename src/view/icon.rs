use eframe::egui::{self, Color32, Painter, Pos2, Rect, Stroke, Vec2};

use crate::weather_type::WeatherType;

const SUN: Color32 = Color32::from_rgb(255, 215, 0);
const CLOUD: Color32 = Color32::from_rgb(200, 200, 200);
const CLOUD_SHADE: Color32 = Color32::from_rgb(170, 170, 175);
const RAIN: Color32 = Color32::from_rgb(100, 150, 255);

/// Panel background for a weather type.
pub fn background_color(weather_type: WeatherType) -> Color32 {
    match weather_type {
        WeatherType::Clear | WeatherType::PartlyCloudy => Color32::from_rgb(135, 206, 250),
        WeatherType::Cloudy | WeatherType::Fog => Color32::GRAY,
        WeatherType::Rain | WeatherType::Snow | WeatherType::Thunderstorm => Color32::DARK_GRAY,
        WeatherType::Unknown => Color32::from_rgb(60, 70, 90),
    }
}

/// Paints a small animated icon for `weather_type` into `rect`.
pub fn paint(painter: &Painter, rect: Rect, weather_type: WeatherType, time: f64) {
    let center = rect.center();
    let radius = rect.width().min(rect.height()) * 0.4;

    match weather_type {
        WeatherType::Clear => sun(painter, center, radius * 0.6, time),
        WeatherType::PartlyCloudy => {
            sun(painter, center + Vec2::new(-radius * 0.3, -radius * 0.3), radius * 0.35, time);
            let drift = (time * 0.8).sin() as f32 * radius * 0.05;
            cloud(painter, center + Vec2::new(radius * 0.15 + drift, radius * 0.2), radius * 0.35);
        }
        WeatherType::Cloudy => {
            cloud(painter, center + Vec2::new(-radius * 0.3, -radius * 0.15), radius * 0.4);
            cloud(painter, center + Vec2::new(radius * 0.3, radius * 0.1), radius * 0.38);
        }
        WeatherType::Rain => {
            falling(painter, center, radius, time, 18, 1.6, |p, pos, size| {
                p.line_segment([pos, pos + Vec2::new(0.0, size)], Stroke::new(2.0, RAIN));
            });
            cloud(painter, center + Vec2::new(0.0, -radius * 0.5), radius * 0.4);
        }
        WeatherType::Snow => {
            falling(painter, center, radius, time, 12, 0.6, |p, pos, size| {
                p.circle_filled(pos, size * 0.3, Color32::WHITE);
            });
            cloud(painter, center + Vec2::new(0.0, -radius * 0.5), radius * 0.4);
        }
        WeatherType::Thunderstorm => {
            falling(painter, center, radius, time, 14, 1.6, |p, pos, size| {
                p.line_segment([pos, pos + Vec2::new(0.0, size)], Stroke::new(2.0, RAIN));
            });
            // Flash on every other third of a second.
            if ((time * 3.0) as i64) % 2 == 0 {
                let bolt = [
                    center + Vec2::new(-radius * 0.2, -radius * 0.3),
                    center,
                    center + Vec2::new(radius * 0.2, radius * 0.4),
                ];
                let stroke = Stroke::new(4.0, Color32::from_rgb(255, 255, 200));
                painter.line_segment([bolt[0], bolt[1]], stroke);
                painter.line_segment([bolt[1], bolt[2]], stroke);
            }
            cloud(painter, center + Vec2::new(0.0, -radius * 0.5), radius * 0.4);
        }
        WeatherType::Fog => {
            for i in 0..4 {
                let y = center.y - radius * 0.45 + i as f32 * radius * 0.3;
                let sway = (time * 0.7 + i as f64).sin() as f32 * radius * 0.15;
                let left = Pos2::new(center.x - radius * 0.8 + sway, y);
                let right = Pos2::new(center.x + radius * 0.8 + sway, y);
                painter.line_segment([left, right], Stroke::new(radius * 0.12, CLOUD));
            }
        }
        WeatherType::Unknown => {
            painter.text(
                center,
                egui::Align2::CENTER_CENTER,
                "?",
                egui::FontId::proportional(radius),
                Color32::WHITE,
            );
        }
    }
}

fn sun(painter: &Painter, center: Pos2, radius: f32, time: f64) {
    let rays = 8;
    for i in 0..rays {
        let angle = (i as f64 / rays as f64) * std::f64::consts::TAU + time * 0.5;
        let dir = Vec2::new(angle.cos() as f32, angle.sin() as f32);
        painter.line_segment(
            [center + dir * radius * 1.1, center + dir * radius * 1.4],
            Stroke::new(3.0, SUN),
        );
    }
    painter.circle_filled(center, radius, SUN);
}

fn cloud(painter: &Painter, center: Pos2, size: f32) {
    painter.circle_filled(center + Vec2::new(0.0, size * 0.35), size * 0.7, CLOUD_SHADE);
    painter.circle_filled(center, size, CLOUD);
    painter.circle_filled(center + Vec2::new(-size * 0.7, size * 0.1), size * 0.75, CLOUD);
    painter.circle_filled(center + Vec2::new(size * 0.7, size * 0.1), size * 0.75, CLOUD);
}

fn falling(
    painter: &Painter,
    center: Pos2,
    radius: f32,
    time: f64,
    count: usize,
    speed: f64,
    draw: impl Fn(&Painter, Pos2, f32),
) {
    let span = radius * 1.5;
    for i in 0..count {
        let x = center.x + ((i % 6) as f32 - 2.5) * radius * 0.25;
        let phase = ((time * speed + i as f64 * 0.37).fract()) as f32;
        let y = center.y - radius * 0.3 + phase * span;
        draw(painter, Pos2::new(x, y), radius * 0.15);
    }
}
