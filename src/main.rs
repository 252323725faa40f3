fn main() {
    sliders::game::run();
}
