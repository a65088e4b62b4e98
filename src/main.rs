fn main() {
    rope_runner::game::run();
}
