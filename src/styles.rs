// Built-in stylesheet for the letter and background effect classes. Letter
// motion reads the per-letter custom properties written by the animator.

pub const STYLESHEET_ID: &str = "heading-burst-styles";

pub const STYLESHEET: &str = r#"
body { transition: all 0.3s ease; min-height: 100vh; }
h1, h2, h3, h4, h5, h6 { position: absolute; cursor: pointer; user-select: none; }
h1.repositioning, h2.repositioning, h3.repositioning,
h4.repositioning, h5.repositioning, h6.repositioning {
  transition: top 1.5s cubic-bezier(0.34, 1.56, 0.64, 1), left 1.5s cubic-bezier(0.34, 1.56, 0.64, 1), transform 1.5s ease;
}
.glowing { text-shadow: 0 0 20px rgba(255, 255, 255, 0.8); }
.letter { display: inline-block; transition: color 0.3s ease, font-size 0.3s ease; }
.letter.exploding { animation: letterExplode 1s cubic-bezier(0.25, 0.46, 0.45, 0.94) forwards; }
.letter.reforming { animation: letterReform 1s cubic-bezier(0.175, 0.885, 0.32, 1.275) forwards; }
.bg-particle { position: fixed; border-radius: 50%; pointer-events: none; z-index: 9997; animation: particleFly 4s ease-out forwards; }
body.pulsing { animation: bodyPulse 0.5s ease-out; }

@keyframes letterExplode {
  0% { transform: translate(0, 0) rotate(0deg) scale(1); font-size: inherit; opacity: 1; }
  50% { text-shadow: 0 0 30px var(--glow-color); }
  100% {
    transform: translate(var(--random-x), var(--random-y)) rotate(var(--random-rotation)) scale(1.2);
    font-size: var(--explosion-size);
    opacity: 0.6;
  }
}
@keyframes letterReform {
  0% {
    transform: translate(var(--reform-start-x), var(--reform-start-y)) rotate(var(--reform-start-rotation)) scale(var(--reform-start-scale));
    opacity: 0.3;
  }
  100% { transform: translate(0, 0) rotate(0deg) scale(1); font-size: var(--final-size); opacity: 1; }
}
@keyframes individualLetterShake {
  0%, 100% { margin-left: 0; }
  25% { margin-left: -3px; }
  75% { margin-left: 3px; }
}
@keyframes letterShake {
  0%, 100% { transform: translate(0, 0); }
  25% { transform: translate(-2px, 1px); }
  75% { transform: translate(2px, -1px); }
}
@keyframes screenShake {
  0%, 100% { transform: translate(0, 0); }
  20% { transform: translate(-8px, 4px); }
  40% { transform: translate(6px, -6px); }
  60% { transform: translate(-4px, 6px); }
  80% { transform: translate(4px, -2px); }
}
@keyframes bodyPulse {
  0% { filter: brightness(1); }
  50% { filter: brightness(1.15); }
  100% { filter: brightness(1); }
}
@keyframes particleFly {
  0% { transform: translate(0, 0) scale(1); opacity: 1; }
  100% { transform: translate(var(--particle-x), var(--particle-y)) scale(0); opacity: 0; }
}
@keyframes explosionRing {
  0% { width: 0; height: 0; margin: 0; opacity: 1; }
  100% { width: 600px; height: 600px; margin: -300px 0 0 -300px; opacity: 0; }
}
@keyframes enhancedSparkle {
  0% { transform: scale(0) rotate(0deg); opacity: 1; }
  50% { transform: scale(1.5) rotate(180deg); opacity: 1; }
  100% { transform: scale(0) rotate(360deg); opacity: 0; }
}
@keyframes miniSparkle {
  0% { transform: scale(0); opacity: 0; }
  50% { transform: scale(1); opacity: 1; }
  100% { transform: scale(0); opacity: 0; }
}
"#;
